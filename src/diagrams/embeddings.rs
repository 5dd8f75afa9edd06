//! Embeddings as a map of meaning: four word clusters in a 2D semantic space and a query point
//! that wanders between them, linking to nearby words with curves weighted by similarity.

use crate::animation::ease::{ease_in, ease_in_out, ease_out};
use crate::curve::eval::{clamp, dist, lerp};
use crate::curve::shape::Curve;
use crate::diagrams::Diagram;
use crate::foundation::core::Point;
use crate::paint::color::{Rgba, palette};
use crate::paint::context::{Context2d, TextAlign};
use crate::paint::primitives::{
    LabelStyle, clear, draw_curve, draw_dot, draw_grid, draw_label, draw_ring,
};

pub const SLUG: &str = "embeddings";
pub const TITLE: &str = "Embeddings & the Shape of Meaning";

const SHOW: f64 = 3.0;
const TRANSITION: f64 = 1.5;
const PER_QUERY: f64 = SHOW + TRANSITION;
/// Normalized distance beyond which a word is not linked to the query.
const MAX_LINK_DIST: f64 = 0.5;

struct Cluster {
    color: Rgba,
    words: [(&'static str, f64, f64); 3],
}

const CLUSTERS: [Cluster; 4] = [
    Cluster {
        color: palette::TEAL,
        words: [("happy", 0.18, 0.22), ("joyful", 0.24, 0.16), ("cheerful", 0.14, 0.30)],
    },
    Cluster {
        color: palette::GREEN,
        words: [("dog", 0.30, 0.38), ("puppy", 0.24, 0.44), ("canine", 0.34, 0.46)],
    },
    Cluster {
        color: palette::CORAL,
        words: [("tax", 0.76, 0.68), ("policy", 0.82, 0.76), ("regulation", 0.70, 0.78)],
    },
    Cluster {
        color: palette::BLUE,
        words: [("code", 0.72, 0.38), ("program", 0.80, 0.32), ("software", 0.78, 0.44)],
    },
];

/// Query label and its normalized position.
const QUERIES: [(&str, f64, f64); 2] = [("joyful puppy", 0.22, 0.34), ("tax code", 0.74, 0.54)];

/// A word in normalized semantic space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Word {
    pub word: &'static str,
    pub pos: Point,
    pub color: Rgba,
}

pub(crate) fn words() -> impl Iterator<Item = Word> {
    CLUSTERS.iter().flat_map(|c| {
        c.words.iter().map(|&(word, nx, ny)| Word {
            word,
            pos: Point::new(nx, ny),
            color: c.color,
        })
    })
}

/// Squared falloff of normalized distance: 1 at the query, 0 at the link cutoff. `None` for
/// words out of reach or sitting on the query itself.
pub(crate) fn similarity(query: Point, word: Point) -> Option<f64> {
    let d = dist(query, word);
    (d < MAX_LINK_DIST && d > 0.01).then(|| {
        let s = 1.0 - d / MAX_LINK_DIST;
        s * s
    })
}

/// Which query is showing and how far the move to the next one has progressed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct QueryState {
    pub index: usize,
    /// Seconds into this query's slot.
    pub local: f64,
    /// Eased progress of the move to the next query; zero while showing.
    pub moving: f64,
}

impl QueryState {
    pub(crate) fn at(time: f64) -> Self {
        let slot = time.rem_euclid(PER_QUERY * QUERIES.len() as f64);
        let index = ((slot / PER_QUERY).floor() as usize).min(QUERIES.len() - 1);
        let local = slot - index as f64 * PER_QUERY;
        let moving = if local > SHOW {
            ease_in_out((local - SHOW) / TRANSITION)
        } else {
            0.0
        };
        Self {
            index,
            local,
            moving,
        }
    }

    fn transitioning(self) -> bool {
        self.local > SHOW
    }

    fn next(self) -> usize {
        (self.index + 1) % QUERIES.len()
    }

    /// Opacity of the links: eases in while showing, dips to zero mid-move and returns.
    pub(crate) fn link_alpha(self) -> f64 {
        if !self.transitioning() {
            ease_out(clamp(self.local / 0.8, 0.0, 1.0))
        } else if self.moving < 0.5 {
            1.0 - ease_in(self.moving * 2.0)
        } else {
            ease_out((self.moving - 0.5) * 2.0)
        }
    }

    /// The query whose links are drawn.
    pub(crate) fn active(self) -> usize {
        if self.moving < 0.5 { self.index } else { self.next() }
    }

    fn position(self) -> Point {
        let (_, ax, ay) = QUERIES[self.index];
        let (_, bx, by) = QUERIES[self.next()];
        Point::new(lerp(ax, bx, self.moving), lerp(ay, by, self.moving))
    }
}

/// Gentle S-curve from `from` to `to`, bowed sideways by `bulge`.
fn link_curve(from: Point, to: Point, bulge: f64) -> Curve {
    let mid = from.midpoint(to);
    let (px, py) = (-(to.y - from.y) * bulge, (to.x - from.x) * bulge);
    Curve::Cubic(
        from,
        Point::new(mid.x + px * 0.6, mid.y + py * 0.6),
        Point::new(mid.x - px * 0.3, mid.y - py * 0.3),
        to,
    )
}

pub struct Embeddings;

impl Diagram for Embeddings {
    fn slug(&self) -> &'static str {
        SLUG
    }

    fn title(&self) -> &'static str {
        TITLE
    }

    fn cycle_secs(&self) -> Option<f64> {
        Some(PER_QUERY * QUERIES.len() as f64)
    }

    fn draw(&self, ctx: &mut Context2d, w: f64, h: f64, time: f64) {
        clear(ctx, w, h);
        draw_grid(ctx, w, h, 40.0);

        let pad = w.min(h) * 0.08;
        let (iw, ih) = (w - pad * 2.0, h - pad * 2.0);
        let to_canvas = |p: Point| Point::new(pad + p.x * iw, pad + p.y * ih);

        let state = QueryState::at(time);
        let link_alpha = state.link_alpha();
        let (_, ax, ay) = QUERIES[state.active()];
        let active = Point::new(ax, ay);
        let query = to_canvas(state.position());

        let mut links: Vec<(Word, f64)> = words()
            .filter_map(|word| similarity(active, word.pos).map(|s| (word, s)))
            .collect();
        links.sort_by(|a, b| b.1.total_cmp(&a.1));

        for (i, (word, sim)) in links.iter().enumerate() {
            let alpha = sim * link_alpha * 0.8;
            if alpha < 0.02 {
                continue;
            }
            let mut bulge = 0.15 + (i % 3) as f64 * 0.08;
            if i % 2 == 0 {
                bulge = -bulge;
            }
            let glow = sim * 18.0;
            draw_curve(
                ctx,
                &link_curve(query, to_canvas(word.pos), bulge),
                60,
                word.color.with_alpha(alpha),
                1.0 + sim * 2.5,
                if glow > 2.0 { glow } else { 0.0 },
            );
        }

        let font = clamp(w * 0.022, 10.0, 12.0);
        for word in words() {
            let pos = to_canvas(word.pos);
            let linked = links
                .iter()
                .find(|(l, _)| l.word == word.word)
                .map(|&(_, s)| s)
                .filter(|_| link_alpha > 0.1);
            let (dot_alpha, glow, radius, label_alpha) = match linked {
                Some(sim) => {
                    let g = sim * link_alpha;
                    (0.4 + g * 0.6, g * 15.0, 3.0 + g * 3.0, 0.4 + g * 0.5)
                }
                None => (0.3, 0.0, 3.0, 0.3),
            };
            draw_dot(ctx, pos, radius, word.color.with_alpha(dot_alpha), glow);
            draw_label(
                ctx,
                word.word,
                Point::new(pos.x, pos.y + radius + font * 0.9),
                LabelStyle::new(word.color.with_alpha(label_alpha), font, TextAlign::Center),
            );
        }

        let pulse = 0.5 + 0.5 * (time * 3.5).sin();
        let q_radius = 5.0 + pulse * 2.0;
        draw_dot(ctx, query, q_radius, palette::YELLOW.with_alpha(0.9), 12.0 + pulse * 8.0);
        draw_ring(
            ctx,
            query,
            q_radius + 4.0 + pulse * 3.0,
            palette::YELLOW.with_alpha(0.2 + pulse * 0.15),
            1.5,
        );

        let q_font = clamp(w * 0.026, 11.0, 14.0);
        let label_at = Point::new(query.x, query.y - q_radius - 12.0);
        let (current, next) = (QUERIES[state.index].0, QUERIES[state.next()].0);
        let style = |a: f64| LabelStyle::new(palette::YELLOW.with_alpha(a), q_font, TextAlign::Center);
        if state.transitioning() && state.moving > 0.3 && state.moving < 0.7 {
            let cross = ease_in_out((state.moving - 0.3) / 0.4);
            draw_label(ctx, current, label_at, style((1.0 - cross) * 0.9));
            draw_label(ctx, next, label_at, style(cross * 0.9));
        } else {
            let shown = if state.moving < 0.5 { current } else { next };
            let alpha = if state.transitioning() && state.moving < 0.3 {
                1.0 - state.moving / 0.3 * 0.2
            } else {
                0.9
            };
            draw_label(ctx, shown, label_at, style(alpha));
        }

        draw_label(
            ctx,
            "semantic space",
            Point::new(w / 2.0, h - 8.0),
            LabelStyle::new(palette::WHITE.with_alpha(0.15), clamp(w * 0.018, 9.0, 10.0), TextAlign::Center),
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/diagrams/embeddings.rs"]
mod tests;
