//! Software-rendered window using `minifb`.
//!
//! Layout (default 800×600):
//!
//! ```text
//! ┌──────────────────────────────────────────────┬──────────────┐
//! │ SCORE: 12                                    │ ┌──────────┐ │
//! │        ▬▬▬▬                                  │ │  camera  │ │
//! │                       ▬▬▬▬▬▬                 │ │ preview  │ │
//! │   ▬▬▬                                        │ └──────────┘ │
//! │                                              │ [SWIPE LEFT] │
//! │                      ●                       │              │
//! └──────────────────────────────────────────────┴──────────────┘
//!              play area (600 px)                  panel (200 px)
//! ```
//!
//! Keys: `←`/`→` move, `Esc` quits.  With the simulated camera, hold `A`/`D`
//! to tilt the hand and press `H` to take it out of view.

use std::sync::mpsc::Sender;

use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};
use tracing::debug;

use crate::app::{AppState, FrameInput, Renderer, Snapshot};
use crate::camera::{Frame, SimInput, SIM_TILT};
use crate::config::WindowConfig;
use crate::error::{AppError, AppResult};
use crate::gesture::GestureEvent;
use crate::input::HeldKeys;
use crate::layout::{Layout, Rect};
use crate::snapshot::Screenshot;

// ════════════════════════════════════════════════════════════════════════════
// Theme
// ════════════════════════════════════════════════════════════════════════════

/// Colours and text sizes, built once and handed to the [`Visualizer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub background:   u32,
    pub player:       u32,
    pub obstacle:     u32,
    pub button_start: u32,
    pub button_quit:  u32,
    pub button_text:  u32,
    pub outline:      u32,
    pub frame_border: u32,
    pub text:         u32,
    pub title:        u32,
    pub score_text:   u32,
    pub gesture_text: u32,
    pub over_text:    u32,
    pub dim_text:     u32,
    /// Pixel size of one font dot.
    pub title_scale:  i32,
    pub body_scale:   i32,
    pub label_scale:  i32,
    pub small_scale:  i32,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background:   0xFF1E1E28,
            player:       0xFF6496FF,
            obstacle:     0xFFFF5050,
            button_start: 0xFF64FF64,
            button_quit:  0xFFFF5050,
            button_text:  0xFF1E1E28,
            outline:      0xFFFFFFFF,
            frame_border: 0xFF646478,
            text:         0xFFFFFFFF,
            title:        0xFF6496FF,
            score_text:   0xFFFFFF96,
            gesture_text: 0xFFB4FFB4,
            over_text:    0xFFFF6464,
            dim_text:     0xFF969696,
            title_scale:  8,
            body_scale:   4,
            label_scale:  3,
            small_scale:  2,
        }
    }
}

/// Window update cap.
const TARGET_FPS: usize = 60;

/// Largest preview height the panel will show.
const MAX_PREVIEW_H: i32 = 400;
const HINT_BOX_H:    i32 = 50;

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window:     Window,
    theme:      Theme,
    buf:        Vec<u32>,
    width:      usize,
    height:     usize,
    sim_tx:     Option<Sender<SimInput>>,
    mouse_down: bool,
    sim_tilt:   f32,
}

impl Visualizer {
    pub fn new(cfg: &WindowConfig, theme: Theme, sim_tx: Option<Sender<SimInput>>) -> AppResult<Self> {
        let mut window = Window::new(
            "Hand Dodge (Esc to quit)",
            cfg.width, cfg.height,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        ).map_err(|e| AppError::Window(e.to_string()))?;

        window.set_target_fps(TARGET_FPS);

        Ok(Visualizer {
            window,
            theme,
            buf: vec![theme.background; cfg.width * cfg.height],
            width: cfg.width,
            height: cfg.height,
            sim_tx,
            mouse_down: false,
            sim_tilt: 0.0,
        })
    }

    /// Forward `A`/`D`/`H` to the simulated camera.
    fn poll_sim_hand(&mut self) {
        let Some(tx) = &self.sim_tx else { return };

        let tilt = if self.window.is_key_down(Key::A) {
            SIM_TILT
        } else if self.window.is_key_down(Key::D) {
            -SIM_TILT
        } else {
            0.0
        };
        if tilt != self.sim_tilt {
            self.sim_tilt = tilt;
            let _ = tx.send(SimInput::Tilt(tilt));
        }
        if self.window.is_key_pressed(Key::H, KeyRepeat::No) {
            let _ = tx.send(SimInput::ToggleHand);
        }
    }

    // ── Screens ───────────────────────────────────────────────────────────

    fn draw_menu(&mut self, layout: &Layout) {
        let t = self.theme;
        self.gradient(self.width as i32, |y| (
            (y / 15).min(30), (y / 12).min(50), (y / 10).min(70),
        ));
        let cx = layout.width / 2;
        self.draw_text_centered("HAND DODGE", cx, layout.height / 3, t.title_scale, t.title);
        self.draw_text_centered("TILT YOUR HAND OR USE THE ARROW KEYS", cx, layout.height / 2 - 50, t.label_scale, t.text);
        self.draw_button(layout.start_button, "START", t.button_start);
    }

    fn draw_play(&mut self, snap: &Snapshot<'_>) {
        let t = self.theme;
        let layout = snap.layout;
        self.fill_rect(0, 0, self.width as i32, self.height as i32, t.background);
        self.gradient(layout.play_width, |y| (
            (y / 10).min(50), (y / 12).min(70), (y / 8).min(90),
        ));

        let p = snap.player;
        self.fill_circle(p.x as i32, p.y as i32, p.radius as i32, t.player);
        for o in snap.obstacles {
            self.fill_rect(o.x as i32, o.y as i32, o.width as i32, o.height as i32, t.obstacle);
        }
        self.draw_text(&format!("SCORE: {}", snap.score), 20, 20, t.body_scale, t.score_text);

        self.draw_panel(snap);
    }

    fn draw_panel(&mut self, snap: &Snapshot<'_>) {
        let t = self.theme;
        let panel = snap.layout.panel();
        let inner_w = panel.w - 20;

        let preview_h = match snap.preview {
            Some(frame) => {
                let h = preview_height(frame, inner_w);
                self.draw_border(Rect::new(panel.x + 8, 8, panel.w - 4 - 8, h + 4), 2, t.frame_border);
                self.blit_frame(frame, Rect::new(panel.x + 10, 10, inner_w, h));
                h
            }
            None => {
                self.draw_text_centered("NO CAMERA", panel.x + panel.w / 2, 30, t.small_scale, t.dim_text);
                40
            }
        };

        let label = match snap.last_gesture {
            Some(GestureEvent::Left)  => Some("SWIPE LEFT"),
            Some(GestureEvent::Right) => Some("SWIPE RIGHT"),
            _ => None,
        };
        if let Some(label) = label {
            let hint = Rect::new(panel.x + 8, preview_h + 12, panel.w - 4 - 8, HINT_BOX_H);
            self.fill_rect(hint.x, hint.y, hint.w, hint.h, t.frame_border);
            let (cx, cy) = hint.center();
            self.draw_text_centered(label, cx, cy, t.label_scale, t.gesture_text);
        }
    }

    fn draw_game_over(&mut self, snap: &Snapshot<'_>) {
        let t = self.theme;
        let layout = snap.layout;
        self.gradient(self.width as i32, |y| (
            (y / 10).min(50), (y / 15).min(30), (y / 20).min(20),
        ));
        let cx = layout.width / 2;
        self.draw_text_centered("GAME OVER", cx, layout.height / 3, t.title_scale, t.over_text);
        self.draw_text_centered(&format!("FINAL SCORE: {}", snap.score), cx, layout.height / 2, t.body_scale, t.score_text);
        self.draw_button(layout.restart_button, "RESTART", t.button_start);
        self.draw_button(layout.quit_button, "QUIT", t.button_quit);
    }

    fn draw_button(&mut self, r: Rect, label: &str, color: u32) {
        let t = self.theme;
        self.fill_rect(r.x, r.y, r.w, r.h, color);
        self.draw_border(r, 2, t.outline);
        let (cx, cy) = r.center();
        self.draw_text_centered(label, cx, cy, t.body_scale, t.button_text);
    }

    // ── Camera preview ────────────────────────────────────────────────────

    /// Nearest-neighbour scale of the frame into `dst`; frames without an
    /// image show their landmarks as dots instead.
    fn blit_frame(&mut self, frame: &Frame, dst: Rect) {
        if frame.has_image() {
            for dy in 0..dst.h {
                let sy = (dy as usize * frame.height) / dst.h as usize;
                for dx in 0..dst.w {
                    let sx = (dx as usize * frame.width) / dst.w as usize;
                    self.set_pixel(dst.x + dx, dst.y + dy, frame.pixels[sy * frame.width + sx]);
                }
            }
        } else {
            self.fill_rect(dst.x, dst.y, dst.w, dst.h, self.theme.background);
            if let Some(points) = &frame.annotation {
                for p in points {
                    let x = dst.x + (p.x * dst.w as f32) as i32;
                    let y = dst.y + (p.y * dst.h as f32) as i32;
                    self.fill_rect(x - 2, y - 2, 4, 4, self.theme.gesture_text);
                }
            }
        }
    }

    // ── Primitive drawing helpers ─────────────────────────────────────────

    /// Vertical gradient over columns `0..w`; `f(y)` gives the RGB per row.
    fn gradient<F: Fn(i32) -> (i32, i32, i32)>(&mut self, w: i32, f: F) {
        for y in 0..self.height as i32 {
            let (r, g, b) = f(y);
            let c = rgb(r.max(0) as u32, g.max(0) as u32, b.max(0) as u32);
            self.fill_rect(0, y, w, 1, c);
        }
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u32) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + w).min(self.width as i32);
        let y1 = (y + h).min(self.height as i32);
        for row in y0..y1 {
            let base = row as usize * self.width;
            for col in x0..x1 {
                self.buf[base + col as usize] = color;
            }
        }
    }

    fn draw_border(&mut self, r: Rect, thickness: i32, color: u32) {
        self.fill_rect(r.x, r.y, r.w, thickness, color);
        self.fill_rect(r.x, r.y + r.h - thickness, r.w, thickness, color);
        self.fill_rect(r.x, r.y, thickness, r.h, color);
        self.fill_rect(r.x + r.w - thickness, r.y, thickness, r.h, color);
    }

    fn fill_circle(&mut self, cx: i32, cy: i32, r: i32, color: u32) {
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r * r {
                    self.set_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.buf[y as usize * self.width + x as usize] = color;
        }
    }

    /// 3×5 bitmap font, each dot drawn as a `scale`×`scale` block.
    fn draw_text(&mut self, text: &str, x: i32, y: i32, scale: i32, color: u32) {
        let mut cx = x;
        for ch in text.chars() {
            let glyph = char_glyph(ch);
            for (row, &bits) in glyph.iter().enumerate() {
                for col in 0..3 {
                    if bits & (1 << (2 - col)) != 0 {
                        self.fill_rect(cx + col * scale, y + row as i32 * scale, scale, scale, color);
                    }
                }
            }
            cx += 4 * scale;
            if cx >= self.width as i32 { break; }
        }
    }

    fn draw_text_centered(&mut self, text: &str, cx: i32, cy: i32, scale: i32, color: u32) {
        let w = text_width(text, scale);
        self.draw_text(text, cx - w / 2, cy - 5 * scale / 2, scale, color);
    }
}

impl Renderer for Visualizer {
    fn poll_input(&mut self) -> FrameInput {
        let mut input = FrameInput::default();
        if !self.window.is_open() || self.window.is_key_pressed(Key::Escape, KeyRepeat::No) {
            input.quit = true;
            return input;
        }

        input.held = HeldKeys {
            left:  self.window.is_key_down(Key::Left),
            right: self.window.is_key_down(Key::Right),
        };

        let down = self.window.get_mouse_down(MouseButton::Left);
        if down && !self.mouse_down {
            if let Some(pos) = self.window.get_mouse_pos(MouseMode::Discard) {
                input.clicks.push(pos);
            }
        }
        self.mouse_down = down;

        self.poll_sim_hand();
        input
    }

    fn render(&mut self, snap: &Snapshot<'_>) {
        match snap.state {
            AppState::Menu       => self.draw_menu(snap.layout),
            AppState::Playing    => self.draw_play(snap),
            AppState::GameOver   => self.draw_game_over(snap),
            AppState::Terminated => return,
        }
        if let Err(e) = self.window.update_with_buffer(&self.buf, self.width, self.height) {
            debug!("window update failed: {}", e);
        }
    }

    fn capture(&self) -> Option<Screenshot> {
        Some(Screenshot { width: self.width, height: self.height, pixels: self.buf.clone() })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

fn rgb(r: u32, g: u32, b: u32) -> u32 {
    0xFF000000 | ((r & 0xFF) << 16) | ((g & 0xFF) << 8) | (b & 0xFF)
}

fn text_width(text: &str, scale: i32) -> i32 {
    let n = text.chars().count() as i32;
    if n == 0 { 0 } else { n * 4 * scale - scale }
}

/// Preview height that keeps the frame's aspect ratio at width `w`.
fn preview_height(frame: &Frame, w: i32) -> i32 {
    let h = if frame.has_image() {
        (w as f32 * frame.height as f32 / frame.width as f32) as i32
    } else {
        w * 3 / 4
    };
    h.clamp(1, MAX_PREVIEW_H)
}

fn char_glyph(c: char) -> [u8; 5] {
    match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'a' | 'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'b' | 'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'c' | 'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'd' | 'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'e' | 'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'f' | 'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'g' | 'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'h' | 'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'i' | 'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'j' | 'J' => [0b001, 0b001, 0b001, 0b101, 0b111],
        'k' | 'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'l' | 'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'm' | 'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'n' | 'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'o' | 'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'p' | 'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'q' | 'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'r' | 'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        's' | 'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        't' | 'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'u' | 'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'v' | 'V' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'w' | 'W' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'x' | 'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'y' | 'Y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        'z' | 'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '!' => [0b010, 0b010, 0b010, 0b000, 0b010],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _   => [0b000, 0b000, 0b010, 0b000, 0b000],
    }
}
