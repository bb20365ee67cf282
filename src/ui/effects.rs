use eframe::egui::{self, Color32, Pos2};

// ---------------------------------------------------------------------------
// Snowfall overlay
// ---------------------------------------------------------------------------

const DURATION_SECONDS: f64 = 4.0;
const FLAKE_COUNT: usize = 140;

/// Purely decorative snowfall drawn over the whole window after a
/// prediction. Flake trajectories are derived from their index, so the
/// effect needs no per-frame state beyond the start time.
#[derive(Debug, Default)]
pub struct Snowfall {
    started_at: Option<f64>,
}

impl Snowfall {
    /// Begin a new snowfall at the given clock time (seconds).
    pub fn start(&mut self, now: f64) {
        self.started_at = Some(now);
    }

    /// Paint the overlay and keep repainting until the effect expires.
    pub fn show(&mut self, ctx: &egui::Context) {
        let Some(t0) = self.started_at else { return };
        let elapsed = ctx.input(|i| i.time) - t0;
        if elapsed >= DURATION_SECONDS {
            self.started_at = None;
            return;
        }

        // Fade out over the final second.
        let fade = (DURATION_SECONDS - elapsed).clamp(0.0, 1.0);
        let rect = ctx.screen_rect();
        let painter = ctx.layer_painter(egui::LayerId::new(
            egui::Order::Foreground,
            egui::Id::new("snowfall"),
        ));

        for flake in 0..FLAKE_COUNT {
            let u = scatter(flake as u64, 1);
            let v = scatter(flake as u64, 2);
            let w = scatter(flake as u64, 3);

            let speed = 60.0 + 90.0 * v;
            let drift = (w - 0.5) * 30.0;
            let x = (u * f64::from(rect.width()) + drift * elapsed)
                .rem_euclid(f64::from(rect.width()));
            let y = (v * f64::from(rect.height()) + speed * elapsed)
                .rem_euclid(f64::from(rect.height()));

            let radius = 1.0 + 2.0 * w;
            let alpha = (fade * (140.0 + 100.0 * u)) as u8;
            painter.circle_filled(
                Pos2::new(x as f32, y as f32),
                radius as f32,
                Color32::from_white_alpha(alpha),
            );
        }

        ctx.request_repaint();
    }
}

/// Deterministic per-flake value in [0, 1) (splitmix64 finalizer).
fn scatter(seed: u64, salt: u64) -> f64 {
    let mut x = seed ^ salt.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    x ^= x >> 30;
    x = x.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^= x >> 31;
    (x >> 11) as f64 / (1u64 << 53) as f64
}
