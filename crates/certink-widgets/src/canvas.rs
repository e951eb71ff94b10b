//! Interactive certificate page: paints elements and turns pointer input
//! into select/drag/resize operations on the layout canvas.

use certink_core::element::{Element, ElementKind, FontWeight, Geometry, PAGE_HEIGHT, PAGE_WIDTH, TextAlign};
use certink_core::{EditorSession, LayoutCanvas};
use egui::{
    Align2, Color32, CursorIcon, FontId, Painter, Pos2, Rect, Response, Sense, Stroke, StrokeKind,
    Ui, vec2,
};
use kurbo::Point;

use crate::{sizing, theme};

/// Mapping between document space and screen space for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageTransform {
    /// Screen position of the page's top-left corner.
    pub origin: Pos2,
    /// Screen pixels per document pixel.
    pub scale: f32,
}

impl PageTransform {
    /// Fit the page to `width` screen pixels starting at `origin`.
    pub fn fit_width(origin: Pos2, width: f32) -> Self {
        Self {
            origin,
            scale: width.max(sizing::MIN_PAGE_WIDTH) / PAGE_WIDTH as f32,
        }
    }

    /// Screen size of the whole page.
    pub fn page_size(&self) -> egui::Vec2 {
        vec2(PAGE_WIDTH as f32, PAGE_HEIGHT as f32) * self.scale
    }

    pub fn to_screen(&self, point: Point) -> Pos2 {
        Pos2::new(
            self.origin.x + point.x as f32 * self.scale,
            self.origin.y + point.y as f32 * self.scale,
        )
    }

    pub fn to_document(&self, pos: Pos2) -> Point {
        Point::new(
            ((pos.x - self.origin.x) / self.scale) as f64,
            ((pos.y - self.origin.y) / self.scale) as f64,
        )
    }

    /// Screen rectangle of an element.
    pub fn rect(&self, geometry: &Geometry) -> Rect {
        Rect::from_min_max(
            self.to_screen(geometry.origin()),
            self.to_screen(geometry.bottom_right()),
        )
    }

    /// Screen rectangle of the resize handle at an element's bottom-right corner.
    pub fn handle_rect(&self, geometry: &Geometry) -> Rect {
        Rect::from_center_size(
            self.to_screen(geometry.bottom_right()),
            vec2(sizing::HANDLE, sizing::HANDLE),
        )
    }
}

/// The page canvas widget.
#[derive(Debug, Clone, Default)]
pub struct PageCanvas {
    /// Draw element outlines for unselected elements too.
    show_outlines: bool,
}

impl PageCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Outline every element, not only the selection.
    pub fn show_outlines(mut self, show: bool) -> Self {
        self.show_outlines = show;
        self
    }

    /// Show the page and apply this frame's pointer interaction.
    ///
    /// The allocated rect includes the desk margin around the page.
    pub fn show(
        &self,
        ui: &mut Ui,
        canvas: &mut LayoutCanvas,
        session: &mut EditorSession,
    ) -> Response {
        let margin = vec2(sizing::DESK_MARGIN, sizing::DESK_MARGIN);
        let fitted = PageTransform::fit_width(
            Pos2::ZERO,
            ui.available_width() - 2.0 * sizing::DESK_MARGIN,
        );
        let (response, painter) =
            ui.allocate_painter(fitted.page_size() + 2.0 * margin, Sense::click_and_drag());
        let transform = PageTransform {
            origin: response.rect.min + margin,
            ..fitted
        };

        self.handle_input(ui, &response, &transform, canvas, session);
        self.paint(&painter, response.rect, &transform, canvas, session);

        response
    }

    fn handle_input(
        &self,
        ui: &Ui,
        response: &Response,
        transform: &PageTransform,
        canvas: &mut LayoutCanvas,
        session: &mut EditorSession,
    ) {
        if response.drag_started() {
            let press = ui
                .input(|i| i.pointer.press_origin())
                .or(response.interact_pointer_pos());
            if let Some(pos) = press {
                self.begin_interaction(pos, transform, canvas, session);
            }
        } else if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let point = transform.to_document(pos);
                let hit = canvas.element_at(point).map(|e| e.id().to_string());
                match hit {
                    Some(id) => {
                        canvas.select_element(session, &id);
                    }
                    None => canvas.clear_selection(session),
                }
            }
        }

        if response.dragged() && session.is_dragging() {
            if let Some(pos) = response.interact_pointer_pos() {
                canvas.update_drag_position(session, transform.to_document(pos));
            }
            ui.ctx().set_cursor_icon(CursorIcon::Grabbing);
        }

        if session.is_dragging() {
            if response.drag_stopped() {
                canvas.end_drag(session);
            } else if !response.contains_pointer() {
                log::debug!("Pointer left the page, ending drag");
                canvas.end_drag(session);
            }
        }
    }

    fn begin_interaction(
        &self,
        pos: Pos2,
        transform: &PageTransform,
        canvas: &LayoutCanvas,
        session: &mut EditorSession,
    ) {
        let point = transform.to_document(pos);

        let on_handle = session
            .selection()
            .and_then(|id| canvas.get(id))
            .filter(|e| transform.handle_rect(&e.geometry).contains(pos))
            .map(|e| e.id().to_string());
        if let Some(id) = on_handle {
            canvas.begin_resize(session, &id, point);
            return;
        }

        match canvas.element_at(point).map(|e| e.id().to_string()) {
            Some(id) => {
                canvas.begin_drag(session, &id, point);
            }
            None => canvas.clear_selection(session),
        }
    }

    fn paint(
        &self,
        painter: &Painter,
        desk: Rect,
        transform: &PageTransform,
        canvas: &LayoutCanvas,
        session: &EditorSession,
    ) {
        let page = Rect::from_min_size(transform.origin, transform.page_size());
        painter.rect_filled(desk, 0.0, theme::DESK_BG);
        painter.rect_filled(page, 0.0, Color32::WHITE);
        painter.rect_stroke(page, 0.0, Stroke::new(1.0, theme::BORDER), StrokeKind::Outside);

        for element in canvas.elements() {
            let rect = transform.rect(&element.geometry);
            match element.kind() {
                ElementKind::Text => paint_text(painter, transform, element, rect),
                ElementKind::Image => paint_image(painter, transform, element, rect),
            }

            if session.is_selected(element.id()) {
                painter.rect_stroke(rect, 0.0, Stroke::new(1.5, theme::ACCENT), StrokeKind::Outside);
                painter.rect_filled(transform.handle_rect(&element.geometry), 1.0, theme::ACCENT);
            } else if self.show_outlines {
                painter.rect_stroke(rect, 0.0, Stroke::new(1.0, theme::BORDER), StrokeKind::Outside);
            }
        }
    }
}

fn paint_text(painter: &Painter, transform: &PageTransform, element: &Element, rect: Rect) {
    let style = &element.style;
    let font = FontId::proportional((style.font_size_px() as f32 * transform.scale).max(1.0));
    // No bold face is loaded; weight is approximated with ink density.
    let color = match style.font_weight() {
        FontWeight::Bold => Color32::BLACK,
        FontWeight::Normal => theme::TEXT,
        FontWeight::Lighter => theme::TEXT_MUTED,
    };
    let (anchor, align) = match style.text_align() {
        TextAlign::Left | TextAlign::Justify => (rect.left_top(), Align2::LEFT_TOP),
        TextAlign::Center => (rect.center_top(), Align2::CENTER_TOP),
        TextAlign::Right => (rect.right_top(), Align2::RIGHT_TOP),
    };
    painter
        .with_clip_rect(rect.expand(2.0))
        .text(anchor, align, &element.content, font, color);
}

fn paint_image(painter: &Painter, transform: &PageTransform, element: &Element, rect: Rect) {
    painter.rect_filled(rect, 0.0, theme::IMAGE_BG);
    painter.rect_stroke(rect, 0.0, Stroke::new(1.0, theme::BORDER), StrokeKind::Inside);
    let name = element
        .content
        .rsplit('/')
        .next()
        .unwrap_or(element.content.as_str());
    painter.with_clip_rect(rect).text(
        rect.center(),
        Align2::CENTER_CENTER,
        name,
        FontId::proportional((10.0 * transform.scale).max(1.0)),
        theme::TEXT_MUTED,
    );
}
