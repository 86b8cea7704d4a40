use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::CanvasState;
use crate::graph::EdgeKind;
use crate::render::{Emphasis, RenderAdapter, edge_segments, emphasis, node_radius};
use crate::session::SessionView;

const BACKGROUND: &str = "#1a1a2e";
const SELECTED_RING: &str = "#FFC107";
const SOURCE_RING: &str = "#43A047";
const HOVER_RING: &str = "rgba(255, 255, 255, 0.6)";

/// Draws sessions onto a 2D canvas through the camera in [`CanvasState`].
pub struct CanvasRenderer<'a> {
	pub ctx: &'a CanvasRenderingContext2d,
	pub canvas: &'a CanvasState,
}

impl RenderAdapter for CanvasRenderer<'_> {
	fn render(&mut self, view: &SessionView<'_>) {
		let (ctx, canvas) = (self.ctx, self.canvas);
		ctx.set_fill_style_str(BACKGROUND);
		ctx.fill_rect(0.0, 0.0, canvas.width, canvas.height);
		ctx.save();
		let _ = ctx.translate(canvas.transform.x, canvas.transform.y);
		let _ = ctx.scale(canvas.transform.k, canvas.transform.k);
		self.draw_edges(view);
		self.draw_nodes(view);
		ctx.restore();
		if view.is_loading {
			self.draw_loading();
		}
	}
}

impl CanvasRenderer<'_> {
	fn draw_edges(&self, view: &SessionView<'_>) {
		let ctx = self.ctx;
		let k = self.canvas.transform.k;
		let (line_width, arrow_size) = (1.5 / k.max(0.5), 10.0);

		for segment in edge_segments(view) {
			let (dx, dy) = (segment.to.x - segment.from.x, segment.to.y - segment.from.y);
			let dist = dx.hypot(dy);
			if dist < 0.001 {
				continue;
			}
			let (ux, uy) = (dx / dist, dy / dist);
			let (tip_x, tip_y) = (
				segment.to.x - ux * segment.target_radius,
				segment.to.y - uy * segment.target_radius,
			);

			ctx.set_stroke_style_str(segment.color);
			ctx.set_line_width(line_width);
			ctx.begin_path();
			ctx.move_to(segment.from.x, segment.from.y);
			match segment.kind {
				EdgeKind::Arrow => ctx.line_to(tip_x - ux * arrow_size, tip_y - uy * arrow_size),
				EdgeKind::Line => ctx.line_to(segment.to.x, segment.to.y),
			}
			ctx.stroke();

			if segment.kind == EdgeKind::Arrow {
				let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
				let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
				ctx.set_fill_style_str(segment.color);
				ctx.begin_path();
				ctx.move_to(tip_x, tip_y);
				ctx.line_to(back_x + px, back_y + py);
				ctx.line_to(back_x - px, back_y - py);
				ctx.close_path();
				ctx.fill();
			}

			if let Some(label) = &segment.label {
				let (mx, my) = (
					(segment.from.x + segment.to.x) / 2.0,
					(segment.from.y + segment.to.y) / 2.0,
				);
				ctx.set_fill_style_str("white");
				ctx.set_font(&format!("{}px sans-serif", 11.0 / k.max(0.5)));
				ctx.set_text_align("center");
				let _ = ctx.fill_text(label, mx - uy * 8.0, my + ux * 8.0);
			}
		}
	}

	fn draw_nodes(&self, view: &SessionView<'_>) {
		let ctx = self.ctx;
		let k = self.canvas.transform.k;
		for node in view.graph.nodes() {
			let (x, y) = (node.position.x, node.position.y);
			let radius = node_radius(node);

			ctx.begin_path();
			let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
			ctx.set_fill_style_str(&node.color);
			ctx.fill();

			let ring = match emphasis(view, node) {
				Emphasis::Source => Some(SOURCE_RING),
				Emphasis::Selected => Some(SELECTED_RING),
				Emphasis::Normal if self.canvas.hover.as_deref() == Some(node.id.as_str()) => {
					Some(HOVER_RING)
				}
				Emphasis::Normal => None,
			};
			if let Some(ring) = ring {
				ctx.begin_path();
				let _ = ctx.arc(x, y, radius + 3.0 / k, 0.0, 2.0 * PI);
				ctx.set_stroke_style_str(ring);
				ctx.set_line_width(2.5 / k);
				ctx.stroke();
			}

			ctx.set_fill_style_str("white");
			ctx.set_font(&format!("bold {}px sans-serif", radius.max(6.0)));
			ctx.set_text_align("center");
			ctx.set_text_baseline("middle");
			let _ = ctx.fill_text(&node.label, x, y);
		}
		ctx.set_text_baseline("alphabetic");
	}

	fn draw_loading(&self) {
		let (ctx, canvas) = (self.ctx, self.canvas);
		ctx.set_fill_style_str("rgba(26, 26, 46, 0.7)");
		ctx.fill_rect(0.0, 0.0, canvas.width, canvas.height);
		ctx.set_fill_style_str("white");
		ctx.set_font("16px sans-serif");
		ctx.set_text_align("center");
		let _ = ctx.fill_text("Loading…", canvas.width / 2.0, canvas.height / 2.0);
	}
}
