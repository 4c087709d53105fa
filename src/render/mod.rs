// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Text output: finished layouts and placement option tables.

use crate::config::RenderLimits;
use crate::context::SearchContext;
use crate::engine::PlacementOption;
use std::fmt::Write;

/// Draw every placed component, cropped to the layout's bounding box.
///
/// Blank cells are spaces, trailing spaces are trimmed. Layouts larger than
/// `limits` are cut off and followed by a note giving the full size.
pub fn render_layout(ctx: &SearchContext, limits: RenderLimits) -> String {
    let bounds = ctx.layout_bounds();
    if bounds.is_empty() {
        return String::new();
    }
    let width = (bounds.width as usize).min(limits.max_width);
    let height = (bounds.height as usize).min(limits.max_height);
    let grid = ctx.grid();

    let mut out = String::new();
    for y in bounds.y..bounds.y + height as i32 {
        let row: String = (bounds.x..bounds.x + width as i32)
            .map(|x| grid.get(x, y))
            .collect();
        out.push_str(row.trim_end());
        out.push('\n');
    }
    if width < bounds.width as usize || height < bounds.height as usize {
        let _ = writeln!(
            out,
            "(truncated: layout is {}x{})",
            bounds.width, bounds.height
        );
    }
    out
}

/// One line per option, in the order given: rank, position, side, score and
/// any conflicting components.
pub fn render_options(ctx: &SearchContext, options: &[PlacementOption]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:>4}  {:<10} {:<6} {:>5}  conflicts", "#", "position", "side", "score");
    for (i, option) in options.iter().enumerate() {
        let conflicts = if option.is_conflict_free() {
            "-".to_string()
        } else {
            option
                .conflicts
                .components
                .iter()
                .map(|&id| ctx.component(id).name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        let _ = writeln!(
            out,
            "{:>4}  {:<10} {:<6} {:>5}  {}",
            i + 1,
            option.position().to_string(),
            option.candidate.side.to_string(),
            option.score(),
            conflicts
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::{Adjacent, ConstraintTag};
    use crate::engine::options::{generate_options, order_options};
    use crate::geometry::{Direction, Position, Tile};

    #[test]
    fn test_render_layout_crops_and_trims() {
        let mut ctx = SearchContext::new();
        ctx.add_component("A", Tile::outline(4, 3).unwrap())
            .unwrap();
        ctx.add_component("B", Tile::from_ascii("xx").unwrap())
            .unwrap();
        ctx.place(0, Position::new(-2, -1));
        ctx.place(1, Position::new(2, 1));

        let text = render_layout(&ctx, RenderLimits::default());
        assert_eq!(text, "+--+\n|  |\n+--+xx\n");
    }

    #[test]
    fn test_render_layout_truncates() {
        let mut ctx = SearchContext::new();
        ctx.add_component("Wide", Tile::solid(10, 4, '#').unwrap())
            .unwrap();
        ctx.place(0, Position::new(0, 0));
        let limits = RenderLimits {
            max_width: 3,
            max_height: 2,
        };
        assert_eq!(
            render_layout(&ctx, limits),
            "###\n###\n(truncated: layout is 10x4)\n"
        );
        assert_eq!(render_layout(&SearchContext::new(), limits), "");
    }

    #[test]
    fn test_render_options() {
        let mut ctx = SearchContext::new();
        ctx.add_component("A", Tile::solid(2, 1, 'a').unwrap())
            .unwrap();
        ctx.add_component("B", Tile::solid(1, 1, 'b').unwrap())
            .unwrap();
        ctx.add_constraint(ConstraintTag::Adjacent, "B", "A", Direction::East)
            .unwrap();
        ctx.place(0, Position::new(0, 0));
        let mut options = generate_options(&ctx, &Adjacent, ctx.constraint(0), 1);
        order_options(&mut options);

        let text = render_options(&ctx, &options);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("(2,0)"));
        assert!(lines[1].contains("east"));
        assert!(lines[1].contains("100"));
    }
}
