//! Next-token prediction as a growing tree: at each step three candidate branches grow, the
//! most probable lights up, and the alternatives fade until the sentence is assembled.

use crate::animation::ease::{ease_in_out, ease_out};
use crate::curve::eval::{clamp, cubic_pt, de_casteljau};
use crate::curve::shape::Curve;
use crate::diagrams::{Diagram, cycle_phase};
use crate::foundation::core::Point;
use crate::paint::color::{Rgba, palette};
use crate::paint::context::{Context2d, TextAlign};
use crate::paint::primitives::{
    LabelStyle, clear, draw_dot, draw_grid, draw_label, draw_line, draw_partial_curve,
};
use std::f64::consts::PI;

pub const SLUG: &str = "token-prediction";
pub const TITLE: &str = "What Is an LLM, Actually?";

const CYCLE: f64 = 10.0;
const PAUSE_START: f64 = 0.6;
const LEVEL_DURATION: f64 = 1.6;
const GROW_FRAC: f64 = 0.30;
const CHOOSE_FRAC: f64 = 0.20;
const FADE_FRAC: f64 = 0.50;
const STEPS: usize = 60;

const START_TOKEN: &str = "The";
const SENTENCE: &str = "\"The model predicts the next\"";

/// One prediction step: the winning token and two runners-up.
struct Level {
    chosen: (&'static str, f64),
    alts: [(&'static str, f64); 2],
}

const LEVELS: [Level; 4] = [
    Level {
        chosen: ("model", 0.62),
        alts: [("cat", 0.23), ("quick", 0.15)],
    },
    Level {
        chosen: ("predicts", 0.55),
        alts: [("learns", 0.30), ("outputs", 0.15)],
    },
    Level {
        chosen: ("the", 0.71),
        alts: [("each", 0.18), ("a", 0.11)],
    },
    Level {
        chosen: ("next", 0.68),
        alts: [("most", 0.20), ("best", 0.12)],
    },
];

/// Where a level is within its grow/choose/fade schedule.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Stage {
    Waiting,
    Growing(f64),
    Choosing(f64),
    Fading(f64),
    Done,
}

/// Stage of level `level` at `cycle_time` seconds into the loop.
pub(crate) fn level_stage(level: usize, cycle_time: f64) -> Stage {
    let elapsed = cycle_time - (PAUSE_START + level as f64 * LEVEL_DURATION);
    if elapsed < 0.0 {
        return Stage::Waiting;
    }
    let grow_end = LEVEL_DURATION * GROW_FRAC;
    let choose_end = grow_end + LEVEL_DURATION * CHOOSE_FRAC;
    let fade_end = choose_end + LEVEL_DURATION * FADE_FRAC;
    if elapsed < grow_end {
        Stage::Growing(clamp(elapsed / grow_end, 0.0, 1.0))
    } else if elapsed < choose_end {
        Stage::Choosing(clamp((elapsed - grow_end) / (choose_end - grow_end), 0.0, 1.0))
    } else if elapsed < fade_end {
        Stage::Fading(clamp((elapsed - choose_end) / (fade_end - choose_end), 0.0, 1.0))
    } else {
        Stage::Done
    }
}

struct Branch {
    pts: [Point; 4],
    token: &'static str,
    prob: f64,
    chosen: bool,
    end: Point,
    /// Vertical offset of the token label from the branch end.
    label_dy: f64,
}

impl Branch {
    fn curve(&self) -> Curve {
        let [p0, p1, p2, p3] = self.pts;
        Curve::Cubic(p0, p1, p2, p3)
    }
}

/// Nodes on the chosen path and the three branches leaving each of the first four.
struct Layout {
    nodes: [Point; 5],
    branches: Vec<[Branch; 3]>,
}

impl Layout {
    fn new(w: f64, h: f64) -> Self {
        let mx = w * 0.08;
        let my = h * 0.15;
        let usable_w = w - mx * 2.0;
        let usable_h = h - my * 2.0;
        let cy = h / 2.0;
        let step_x = usable_w / 4.0;
        let nodes: [Point; 5] = std::array::from_fn(|n| Point::new(mx + step_x * n as f64, cy));

        let spread = (usable_h * 0.32).min(80.0);
        let alt_len = step_x * 0.7;
        let branches = LEVELS
            .iter()
            .enumerate()
            .map(|(lvl, level)| {
                let from = nodes[lvl];
                let to = nodes[lvl + 1];
                let chosen = Branch {
                    pts: [
                        from,
                        Point::new(from.x + step_x * 0.35, from.y),
                        Point::new(from.x + step_x * 0.65, to.y),
                        to,
                    ],
                    token: level.chosen.0,
                    prob: level.chosen.1,
                    chosen: true,
                    end: to,
                    label_dy: -14.0,
                };
                let alt = |a: usize| {
                    let dir = if a == 0 { -1.0 } else { 1.0 };
                    let y_off = dir * spread * (0.6 + a as f64 * 0.15);
                    let end = Point::new(from.x + alt_len, from.y + y_off);
                    Branch {
                        pts: [
                            from,
                            Point::new(from.x + alt_len * 0.3, from.y + y_off * 0.1),
                            Point::new(from.x + alt_len * 0.65, from.y + y_off * 0.7),
                            end,
                        ],
                        token: level.alts[a].0,
                        prob: level.alts[a].1,
                        chosen: false,
                        end,
                        label_dy: if a == 0 { -12.0 } else { 12.0 },
                    }
                };
                [chosen, alt(0), alt(1)]
            })
            .collect();
        Self { nodes, branches }
    }
}

fn alt_alpha(prob: f64) -> f64 {
    0.15 + prob * 0.25
}

/// Brightness of chosen-path node `n` at `cycle_time`, or `None` while it is hidden.
pub(crate) fn node_activity(n: usize, cycle_time: f64) -> Option<f64> {
    if n == 0 {
        let appear = clamp((cycle_time - PAUSE_START * 0.3) / 0.3, 0.0, 1.0);
        return (appear > 0.0).then_some(appear);
    }
    match level_stage(n - 1, cycle_time) {
        Stage::Waiting => None,
        Stage::Growing(p) => (p > 0.9).then(|| clamp((p - 0.9) / 0.1, 0.0, 1.0)),
        Stage::Choosing(p) => Some(0.7 + 0.3 * (p * PI).sin()),
        Stage::Fading(_) | Stage::Done => Some(1.0),
    }
}

fn mono(color: Rgba, size: f64) -> LabelStyle {
    LabelStyle::new(color, size, TextAlign::Center)
}

pub struct TokenPrediction;

impl TokenPrediction {
    fn draw_branch(ctx: &mut Context2d, branch: &Branch, stage: Stage) {
        let base_width = 1.0 + branch.prob * 4.0;
        let alt_width = 0.8 + branch.prob * 2.0;
        let curve = &branch.curve();
        match stage {
            Stage::Waiting => {}
            Stage::Growing(p) => {
                let grow = ease_out(p);
                if branch.chosen {
                    draw_partial_curve(ctx, curve, STEPS, grow, palette::TEAL.with_alpha(0.5), base_width, 0.0);
                } else {
                    let color = palette::WHITE.with_alpha(alt_alpha(branch.prob));
                    draw_partial_curve(ctx, curve, STEPS, grow, color, alt_width, 0.0);
                }
                if grow > 0.8 {
                    let label_alpha = clamp((grow - 0.8) / 0.2, 0.0, 1.0);
                    let y = branch.end.y + branch.label_dy;
                    if branch.chosen {
                        let tip = curve.eval(grow);
                        let style = mono(palette::TEAL.with_alpha(label_alpha * 0.7), 10.0);
                        draw_label(ctx, branch.token, Point::new(tip.x, y), style);
                    } else {
                        let style = mono(palette::WHITE.with_alpha(label_alpha * 0.3), 9.0);
                        draw_label(ctx, branch.token, Point::new(branch.end.x, y), style);
                    }
                }
            }
            Stage::Choosing(p) => {
                let choose = ease_in_out(p);
                if branch.chosen {
                    let glow = palette::TEAL.with_alpha(0.15 + choose * 0.2);
                    draw_partial_curve(ctx, curve, STEPS, 1.0, glow, base_width + 4.0, 15.0 * choose);
                    let main = palette::TEAL.with_alpha(0.5 + choose * 0.45);
                    draw_partial_curve(ctx, curve, STEPS, 1.0, main, base_width + choose * 1.5, 8.0 * choose);
                    if choose > 0.1 && choose < 0.9 {
                        Self::draw_construction(ctx, branch, choose);
                    }
                } else {
                    let color = palette::WHITE.with_alpha(alt_alpha(branch.prob));
                    draw_partial_curve(ctx, curve, STEPS, 1.0, color, alt_width, 0.0);
                }
            }
            Stage::Fading(_) | Stage::Done => {
                let fade = match stage {
                    Stage::Fading(p) => ease_in_out(p),
                    _ => 1.0,
                };
                if branch.chosen {
                    draw_partial_curve(ctx, curve, STEPS, 1.0, palette::TEAL.with_alpha(0.15), base_width + 4.0, 15.0);
                    draw_partial_curve(ctx, curve, STEPS, 1.0, palette::TEAL.with_alpha(0.9), base_width + 1.5, 8.0);
                    let at = Point::new(branch.end.x, branch.end.y - 14.0);
                    draw_label(ctx, branch.token, at, mono(palette::TEAL, 11.0));
                } else {
                    let remain = 1.0 - fade;
                    if remain > 0.01 {
                        let color = palette::WHITE.with_alpha(alt_alpha(branch.prob) * remain);
                        draw_partial_curve(ctx, curve, STEPS, 1.0, color, alt_width * remain, 0.0);
                        let at = Point::new(branch.end.x, branch.end.y + branch.label_dy);
                        draw_label(ctx, branch.token, at, mono(palette::WHITE.with_alpha(0.3 * remain), 9.0));
                    }
                }
            }
        }
    }

    /// Dashed De Casteljau scaffolding sliding along the winning branch.
    fn draw_construction(ctx: &mut Context2d, branch: &Branch, choose: f64) {
        let [p0, p1, p2, p3] = branch.pts;
        let alpha = (choose * PI).sin() * 0.6;
        let dc = de_casteljau(p0, p1, p2, p3, 0.3 + choose * 0.4);
        let dim = palette::TEAL.with_alpha(alpha * 0.3);
        let mid = palette::TEAL.with_alpha(alpha * 0.5);
        draw_line(ctx, dc.l1[0], dc.l1[1], dim, 1.0, &[3.0, 3.0]);
        draw_line(ctx, dc.l1[1], dc.l1[2], dim, 1.0, &[3.0, 3.0]);
        draw_line(ctx, dc.l2[0], dc.l2[1], mid, 1.0, &[3.0, 3.0]);
        for p in dc.l1 {
            draw_dot(ctx, p, 2.0, dim, 0.0);
        }
        for p in dc.l2 {
            draw_dot(ctx, p, 2.0, mid, 0.0);
        }
        draw_dot(ctx, dc.pt, 3.5, palette::TEAL.with_alpha(alpha), 8.0 * alpha);
    }

    /// Token and probability labels for a whole level while its winner is being picked.
    fn draw_choice_labels(ctx: &mut Context2d, branches: &[Branch; 3], choose: f64) {
        for branch in branches {
            let at = Point::new(branch.end.x, branch.end.y + branch.label_dy);
            if branch.chosen {
                draw_label(ctx, branch.token, at, mono(palette::TEAL.with_alpha(0.7 + choose * 0.3), 11.0));
            } else {
                draw_label(ctx, branch.token, at, mono(palette::WHITE.with_alpha(0.3), 9.0));
            }
        }
        if choose <= 0.2 {
            return;
        }
        let prob_alpha = clamp((choose - 0.2) / 0.4, 0.0, 1.0) * 0.5;
        for branch in branches {
            let [p0, p1, p2, p3] = branch.pts;
            let mid = cubic_pt(p0, p1, p2, p3, 0.5);
            let dy = if branch.chosen { 12.0 } else { branch.label_dy.signum() * -10.0 };
            let color = if branch.chosen {
                palette::TEAL.with_alpha(prob_alpha)
            } else {
                palette::WHITE.with_alpha(prob_alpha * 0.6)
            };
            let text = format!("{:.0}%", branch.prob * 100.0);
            draw_label(ctx, &text, Point::new(mid.x, mid.y + dy), mono(color, 8.0));
        }
    }
}

impl Diagram for TokenPrediction {
    fn slug(&self) -> &'static str {
        SLUG
    }

    fn title(&self) -> &'static str {
        TITLE
    }

    fn cycle_secs(&self) -> Option<f64> {
        Some(CYCLE)
    }

    fn draw(&self, ctx: &mut Context2d, w: f64, h: f64, time: f64) {
        clear(ctx, w, h);
        draw_grid(ctx, w, h, 40.0);

        let layout = Layout::new(w, h);
        let cycle_time = cycle_phase(time, CYCLE) * CYCLE;

        for (lvl, branches) in layout.branches.iter().enumerate() {
            let stage = level_stage(lvl, cycle_time);
            for branch in branches {
                Self::draw_branch(ctx, branch, stage);
            }
            if let Stage::Choosing(p) = stage {
                Self::draw_choice_labels(ctx, branches, ease_in_out(p));
            }
        }

        for (n, node) in layout.nodes.iter().enumerate() {
            let Some(activity) = node_activity(n, cycle_time) else {
                continue;
            };
            let alpha = 0.3 + activity * 0.7;
            draw_dot(ctx, *node, 4.0 + activity * 2.0, palette::TEAL.with_alpha(alpha), activity * 12.0);
            draw_dot(ctx, *node, 2.0, palette::PURE_WHITE.with_alpha(alpha * 0.8), 0.0);
        }

        let start_alpha = clamp((cycle_time - PAUSE_START * 0.1) / 0.4, 0.0, 1.0);
        if start_alpha > 0.0 {
            let at = Point::new(layout.nodes[0].x, layout.nodes[0].y - 16.0);
            draw_label(ctx, &format!("\"{START_TOKEN}\""), at, mono(palette::TEAL.with_alpha(start_alpha), 12.0));
        }

        let sentence = match level_stage(LEVELS.len() - 1, cycle_time) {
            Stage::Fading(p) => Some(ease_out(p)),
            Stage::Done => Some(1.0),
            _ => None,
        };
        if let Some(st) = sentence {
            let y = h * 0.88;
            let alpha = st * 0.85;
            draw_label(ctx, SENTENCE, Point::new(w / 2.0, y), mono(palette::TEAL.with_alpha(alpha * 0.3), 13.0));
            draw_label(ctx, SENTENCE, Point::new(w / 2.0, y), mono(palette::TEAL.with_alpha(alpha), 13.0));
            if st > 0.5 {
                let sub = clamp((st - 0.5) / 0.5, 0.0, 1.0) * 0.4;
                draw_label(
                    ctx,
                    "next-token prediction",
                    Point::new(w / 2.0, y + 18.0),
                    mono(palette::WHITE.with_alpha(sub), 10.0),
                );
            }
        }

        draw_label(
            ctx,
            "token prediction",
            Point::new(w * 0.08 + 4.0, h * 0.07),
            LabelStyle::new(palette::TEXT_DIM, 10.0, TextAlign::Left),
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/diagrams/token_prediction.rs"]
mod tests;
