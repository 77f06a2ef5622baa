//! Flag icons painted with the egui painter, one per supported currency.

use egui::{Color32, Painter, Pos2, Rect, Sense, Shape, Stroke, Ui, Vec2, pos2, vec2};

use crate::core::Currency;

pub const ICON_SIZE: Vec2 = vec2(24.0, 16.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    UnitedStates,
    Nepal,
    EuropeanUnion,
    India,
    UnitedKingdom,
    Japan,
}

/// Same order as [`Currency::ALL`].
pub const FLAGS: [Flag; 6] = [
    Flag::UnitedStates,
    Flag::Nepal,
    Flag::EuropeanUnion,
    Flag::India,
    Flag::UnitedKingdom,
    Flag::Japan,
];

const RED: Color32 = Color32::from_rgb(178, 34, 52);
const NAVY: Color32 = Color32::from_rgb(1, 33, 105);
const CRIMSON: Color32 = Color32::from_rgb(220, 20, 60);
const EU_BLUE: Color32 = Color32::from_rgb(0, 51, 153);
const EU_GOLD: Color32 = Color32::from_rgb(255, 204, 0);
const SAFFRON: Color32 = Color32::from_rgb(255, 153, 51);
const INDIA_GREEN: Color32 = Color32::from_rgb(19, 136, 8);
const BORDER: Color32 = Color32::from_gray(180);

impl Flag {
    pub fn for_currency(currency: Currency) -> Flag {
        FLAGS[currency.index_of()]
    }

    pub fn currency(&self) -> Currency {
        match self {
            Flag::UnitedStates => Currency::Usd,
            Flag::Nepal => Currency::Npr,
            Flag::EuropeanUnion => Currency::Eur,
            Flag::India => Currency::Inr,
            Flag::UnitedKingdom => Currency::Gbp,
            Flag::Japan => Currency::Jpy,
        }
    }

    pub fn paint(&self, painter: &Painter, rect: Rect) {
        match self {
            Flag::UnitedStates => paint_united_states(painter, rect),
            Flag::Nepal => paint_nepal(painter, rect),
            Flag::EuropeanUnion => paint_european_union(painter, rect),
            Flag::India => paint_india(painter, rect),
            Flag::UnitedKingdom => paint_united_kingdom(painter, rect),
            Flag::Japan => paint_japan(painter, rect),
        }
    }
}

/// Allocates an icon-sized area in `ui` and paints the currency's flag into it.
pub fn flag_icon(ui: &mut Ui, currency: Currency) {
    let (rect, _) = ui.allocate_exact_size(ICON_SIZE, Sense::hover());
    if ui.is_rect_visible(rect) {
        Flag::for_currency(currency).paint(ui.painter(), rect);
    }
}

fn at(rect: Rect, x: f32, y: f32) -> Pos2 {
    pos2(
        rect.left() + rect.width() * x,
        rect.top() + rect.height() * y,
    )
}

fn outline(painter: &Painter, rect: Rect) {
    let stroke = Stroke::new(1.0, BORDER);
    let corners = [
        rect.left_top(),
        rect.right_top(),
        rect.right_bottom(),
        rect.left_bottom(),
    ];
    for i in 0..corners.len() {
        painter.line_segment([corners[i], corners[(i + 1) % corners.len()]], stroke);
    }
}

fn horizontal_bands(painter: &Painter, rect: Rect, colors: &[Color32]) {
    let band = rect.height() / colors.len() as f32;
    for (i, color) in colors.iter().enumerate() {
        let top = rect.top() + band * i as f32;
        let stripe = Rect::from_min_max(pos2(rect.left(), top), pos2(rect.right(), top + band));
        painter.rect_filled(stripe, 0.0, *color);
    }
}

fn paint_united_states(painter: &Painter, rect: Rect) {
    let stripes: Vec<Color32> = (0..13)
        .map(|i| if i % 2 == 0 { RED } else { Color32::WHITE })
        .collect();
    horizontal_bands(painter, rect, &stripes);
    let canton = Rect::from_min_max(rect.left_top(), at(rect, 0.4, 7.0 / 13.0));
    painter.rect_filled(canton, 0.0, NAVY);
}

// The pennant is not convex, so it is drawn as two stacked triangles.
fn paint_nepal(painter: &Painter, rect: Rect) {
    let upper = vec![at(rect, 0.05, 0.0), at(rect, 0.6, 0.5), at(rect, 0.05, 0.5)];
    let lower = vec![at(rect, 0.05, 0.35), at(rect, 0.6, 1.0), at(rect, 0.05, 1.0)];
    let border = Stroke::new(1.0, NAVY);
    painter.add(Shape::convex_polygon(upper, CRIMSON, border));
    painter.add(Shape::convex_polygon(lower, CRIMSON, border));
    painter.circle_filled(at(rect, 0.18, 0.3), rect.height() * 0.08, Color32::WHITE);
    painter.circle_filled(at(rect, 0.18, 0.75), rect.height() * 0.1, Color32::WHITE);
}

fn paint_european_union(painter: &Painter, rect: Rect) {
    painter.rect_filled(rect, 0.0, EU_BLUE);
    let center = rect.center();
    let radius = rect.height() * 0.33;
    for i in 0..12 {
        let angle = i as f32 * std::f32::consts::TAU / 12.0;
        let star = center + vec2(angle.cos(), angle.sin()) * radius;
        painter.circle_filled(star, rect.height() * 0.05, EU_GOLD);
    }
}

fn paint_india(painter: &Painter, rect: Rect) {
    horizontal_bands(painter, rect, &[SAFFRON, Color32::WHITE, INDIA_GREEN]);
    let wheel = rect.height() / 6.0 * 0.9;
    painter.circle_stroke(rect.center(), wheel, Stroke::new(1.0, NAVY));
    painter.circle_filled(rect.center(), wheel * 0.3, NAVY);
}

fn paint_united_kingdom(painter: &Painter, rect: Rect) {
    painter.rect_filled(rect, 0.0, NAVY);
    let unit = rect.height() / 10.0;
    let diagonals = [
        [rect.left_top(), rect.right_bottom()],
        [rect.left_bottom(), rect.right_top()],
    ];
    for diagonal in diagonals {
        painter.line_segment(diagonal, Stroke::new(unit * 2.0, Color32::WHITE));
    }
    for diagonal in diagonals {
        painter.line_segment(diagonal, Stroke::new(unit * 0.8, RED));
    }

    let vertical = [at(rect, 0.5, 0.0), at(rect, 0.5, 1.0)];
    let horizontal = [at(rect, 0.0, 0.5), at(rect, 1.0, 0.5)];
    painter.line_segment(vertical, Stroke::new(unit * 3.0, Color32::WHITE));
    painter.line_segment(horizontal, Stroke::new(unit * 3.0, Color32::WHITE));
    painter.line_segment(vertical, Stroke::new(unit * 1.8, RED));
    painter.line_segment(horizontal, Stroke::new(unit * 1.8, RED));
}

fn paint_japan(painter: &Painter, rect: Rect) {
    painter.rect_filled(rect, 0.0, Color32::WHITE);
    painter.circle_filled(rect.center(), rect.height() * 0.3, Color32::from_rgb(188, 0, 45));
    outline(painter, rect);
}
