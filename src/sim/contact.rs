//! Ball-board contact: touching test and constraint resolution
//!
//! Contact is judged against the *previous* frame's plane. `old_distance` and
//! `old_normal` are what the ball was resting on when the frame began; the
//! resolver compares the new position against them to tell a ball that just
//! landed (was at or above rest height, now below) from one that is already
//! below the surface and must not be pulled up through it.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::board::BoardState;
use crate::settings::Settings;

/// Contact memory carried from one frame to the next
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContactState {
    /// Signed distance of the ball center to the board plane last frame
    pub old_distance: f32,
    /// Board normal last frame
    pub old_normal: Vec3,
}

impl ContactState {
    pub fn resting(rest_height: f32) -> Self {
        Self {
            old_distance: rest_height,
            old_normal: Vec3::Z,
        }
    }

    /// Whether the ball sat on the flat surface at the end of last frame.
    ///
    /// Call before the board is tilted for this frame, so `board` still
    /// holds last frame's angles.
    pub fn touching(&self, position: Vec3, board: &BoardState, settings: &Settings) -> bool {
        if (self.old_distance - settings.rest_height).abs() > settings.touch_tolerance {
            return false;
        }
        let proj = position - self.old_distance * self.old_normal;
        board.contains(proj, settings.half_extent)
    }

    /// Carry this frame's plane into the next
    pub fn remember(&mut self, distance: f32, normal: Vec3) {
        self.old_distance = distance;
        self.old_normal = normal;
    }
}

impl Default for ContactState {
    fn default() -> Self {
        Self::resting(crate::consts::REST_HEIGHT)
    }
}

/// Which part of the board constrained the ball this frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Contact {
    /// Footprint on the flat surface; `pushed` if the ball was lifted back onto it
    Flat { pushed: bool },
    /// Footprint on the rounded lip
    Lip { pushed: bool },
    /// Off the board or under it; unconstrained
    Free,
}

impl Contact {
    pub fn is_free(&self) -> bool {
        matches!(self, Contact::Free)
    }
}

/// Result of resolving one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    /// Corrected ball position
    pub position: Vec3,
    /// Distance to the current plane after correction
    pub distance: f32,
    pub contact: Contact,
}

/// Height of the rounded lip at `out_dist` past the flat edge.
///
/// A quarter circle of radius `lip_radius`: rest height at the flat edge,
/// `rest_height - lip_radius` at the outer rim.
pub fn lip_height(out_dist: f32, settings: &Settings) -> f32 {
    let r = settings.lip_radius;
    (settings.rest_height - r) + (r * r - out_dist * out_dist).max(0.0).sqrt()
}

/// How far past the flat edge the footprint is on its lip axis, or `None`
/// if it is beyond the lip on either axis.
///
/// At a corner, where both axes are past the flat edge, the X lip wins.
fn lip_offset(proj: Vec3, board: &BoardState, settings: &Settings) -> Option<f32> {
    let cos = Vec2::new(board.yaw().cos(), board.pitch().cos());
    let outer = (settings.half_extent + settings.lip_radius) * cos;
    let (px, py) = (proj.x.abs(), proj.y.abs());
    if px >= outer.x || py >= outer.y {
        return None;
    }
    // Undo the tilt foreshortening before measuring against the flat extent
    let out = Vec2::new(px / cos.x, py / cos.y) - Vec2::splat(settings.half_extent);
    let out_dist = if out.x > 0.0 { out.x } else { out.y };
    Some(out_dist.max(0.0))
}

/// Keep the ball on the board after integration.
///
/// `old_distance` is last frame's distance; see the module docs for why the
/// lag matters.
pub fn resolve(
    position: Vec3,
    old_distance: f32,
    board: &BoardState,
    settings: &Settings,
) -> Resolution {
    let normal = board.normal;
    let rest = settings.rest_height;
    let distance = position.dot(normal);
    let proj = position - distance * normal;

    if board.contains(proj, settings.half_extent) {
        if old_distance >= rest && distance < rest {
            return Resolution {
                position: position + normal * (rest - distance),
                distance: rest,
                contact: Contact::Flat { pushed: true },
            };
        }
        return Resolution {
            position,
            distance,
            contact: Contact::Flat { pushed: false },
        };
    }

    match lip_offset(proj, board, settings) {
        Some(out_dist) if distance >= 0.0 => {
            let true_dist = lip_height(out_dist, settings);
            if distance < true_dist {
                Resolution {
                    position: position + normal * (true_dist - distance),
                    distance: true_dist,
                    contact: Contact::Lip { pushed: true },
                }
            } else {
                Resolution {
                    position,
                    distance,
                    contact: Contact::Lip { pushed: false },
                }
            }
        }
        _ => Resolution {
            position,
            distance,
            contact: Contact::Free,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::board::surface_normal;
    use proptest::prelude::*;

    fn level() -> BoardState {
        BoardState::default()
    }

    fn tilted(pitch: f32, yaw: f32) -> BoardState {
        let rotation = Vec2::new(pitch, yaw);
        BoardState {
            rotation,
            normal: surface_normal(rotation),
        }
    }

    #[test]
    fn test_lip_endpoints() {
        let settings = Settings::default();
        assert!((lip_height(0.0, &settings) - 2.0).abs() < 1e-6);
        assert!((lip_height(1.0, &settings) - 1.0).abs() < 1e-6);
        // Past the rim the sqrt argument is clamped
        assert!((lip_height(1.5, &settings) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_landing_is_pushed_back_to_rest() {
        let settings = Settings::default();
        let r = resolve(Vec3::new(3.0, -2.0, 1.9), 2.0, &level(), &settings);
        assert_eq!(r.contact, Contact::Flat { pushed: true });
        assert_eq!(r.distance, 2.0);
        assert!((r.position.z - 2.0).abs() < 1e-6);
        assert_eq!(r.position.x, 3.0);
    }

    #[test]
    fn test_ball_under_board_is_not_pulled_up() {
        let settings = Settings::default();
        let r = resolve(Vec3::new(0.0, 0.0, 1.0), 1.2, &level(), &settings);
        assert_eq!(r.contact, Contact::Flat { pushed: false });
        assert_eq!(r.position, Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_ball_above_board_is_left_alone() {
        let settings = Settings::default();
        let r = resolve(Vec3::new(0.0, 0.0, 3.0), 3.5, &level(), &settings);
        assert_eq!(r.contact, Contact::Flat { pushed: false });
        assert_eq!(r.distance, 3.0);
    }

    #[test]
    fn test_lip_lifts_ball() {
        let settings = Settings::default();
        // Half a unit past the flat edge, sitting too low
        let r = resolve(Vec3::new(10.5, 0.0, 1.2), 2.0, &level(), &settings);
        let expected = 1.0 + (1.0f32 - 0.25).sqrt();
        assert_eq!(r.contact, Contact::Lip { pushed: true });
        assert!((r.distance - expected).abs() < 1e-5);
        assert!((r.position.z - expected).abs() < 1e-5);
    }

    #[test]
    fn test_lip_on_y_axis() {
        let settings = Settings::default();
        let r = resolve(Vec3::new(0.0, -10.8, 0.5), 2.0, &level(), &settings);
        assert_eq!(r.contact, Contact::Lip { pushed: true });
        assert!(r.distance > 1.0 && r.distance < 2.0);
    }

    #[test]
    fn test_lip_respects_tilt_foreshortening() {
        let settings = Settings::default();
        let board = tilted(0.0, 0.4);
        // Board-space +X axis, half a unit past the flat edge
        let along = Vec3::new(0.4f32.cos(), 0.0, -0.4f32.sin());
        let position = along * 10.5 + board.normal * 0.5;
        let r = resolve(position, 2.0, &board, &settings);
        let expected = 1.0 + (1.0f32 - 0.25).sqrt();
        assert_eq!(r.contact, Contact::Lip { pushed: true });
        assert!((r.distance - expected).abs() < 1e-4);
    }

    #[test]
    fn test_high_over_lip_not_pushed() {
        let settings = Settings::default();
        let r = resolve(Vec3::new(10.5, 0.0, 3.0), 3.0, &level(), &settings);
        assert_eq!(r.contact, Contact::Lip { pushed: false });
    }

    #[test]
    fn test_off_board_is_free() {
        let settings = Settings::default();
        let r = resolve(Vec3::new(11.5, 0.0, 0.5), 2.0, &level(), &settings);
        assert_eq!(r.contact, Contact::Free);
        assert_eq!(r.position, Vec3::new(11.5, 0.0, 0.5));

        // Beyond the lip on one axis even though the other is on the lip
        let r = resolve(Vec3::new(10.5, 11.2, 0.5), 2.0, &level(), &settings);
        assert!(r.contact.is_free());
    }

    #[test]
    fn test_below_plane_near_edge_is_free() {
        let settings = Settings::default();
        let r = resolve(Vec3::new(10.5, 0.0, -0.1), 2.0, &level(), &settings);
        assert_eq!(r.contact, Contact::Free);
    }

    #[test]
    fn test_corner_prefers_x_lip() {
        let settings = Settings::default();
        let r = resolve(Vec3::new(10.2, 10.6, 0.0), 2.0, &level(), &settings);
        let expected = lip_height(0.2, &settings);
        assert!((expected - 1.9797959).abs() < 1e-5);
        assert!((r.distance - expected).abs() < 1e-5);
        assert_eq!(r.contact, Contact::Lip { pushed: true });

        // Y lip only when X is back on the flat
        let r = resolve(Vec3::new(9.9, 10.6, 0.0), 2.0, &level(), &settings);
        assert!((r.distance - lip_height(0.6, &settings)).abs() < 1e-5);
    }

    #[test]
    fn test_touching_uses_previous_plane() {
        let settings = Settings::default();
        let board = level();
        let contact = ContactState::resting(2.0);
        assert!(contact.touching(Vec3::new(5.0, 5.0, 2.0), &board, &settings));
        assert!(!contact.touching(Vec3::new(10.5, 0.0, 2.0), &board, &settings));

        let airborne = ContactState {
            old_distance: 2.5,
            old_normal: Vec3::Z,
        };
        assert!(!airborne.touching(Vec3::new(0.0, 0.0, 2.5), &board, &settings));

        let within_tolerance = ContactState {
            old_distance: 2.009,
            old_normal: Vec3::Z,
        };
        assert!(within_tolerance.touching(Vec3::new(0.0, 0.0, 2.009), &board, &settings));
    }

    proptest! {
        #[test]
        fn prop_lip_monotone_between_rest_and_rim(a in 0.0f32..=1.0, b in 0.0f32..=1.0) {
            let settings = Settings::default();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let (h_lo, h_hi) = (lip_height(lo, &settings), lip_height(hi, &settings));
            prop_assert!(h_hi <= h_lo + 1e-6);
            prop_assert!((1.0..=2.0).contains(&h_lo));
            prop_assert!((1.0..=2.0).contains(&h_hi));
        }

        #[test]
        fn prop_landing_never_penetrates(
            pitch in -0.5f32..0.5,
            yaw in -0.5f32..0.5,
            x in -7.0f32..7.0,
            y in -7.0f32..7.0,
            depth in 0.0f32..1.9,
            old in 2.0f32..4.0,
        ) {
            let settings = Settings::default();
            let board = tilted(pitch, yaw);
            let on_plane = Vec3::new(x, y, 0.0) - Vec3::new(x, y, 0.0).dot(board.normal) * board.normal;
            let position = on_plane + board.normal * (2.0 - depth - 1e-3);
            let r = resolve(position, old, &board, &settings);
            prop_assert_eq!(r.contact, Contact::Flat { pushed: true });
            prop_assert_eq!(r.distance, 2.0);
            prop_assert!((r.position.dot(board.normal) - 2.0).abs() < 1e-4);
        }
    }
}
