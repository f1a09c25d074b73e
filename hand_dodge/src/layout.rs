//! Screen geometry shared by the renderer and the click handling.

use crate::config::WindowConfig;

/// Axis-aligned rectangle in window pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }

    /// Half-open on the right and bottom edges.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x as f32
            && py >= self.y as f32
            && px < (self.x + self.w) as f32
            && py < (self.y + self.h) as f32
    }

    pub fn center(&self) -> (i32, i32) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }
}

const BUTTON_W: i32 = 200;
const BUTTON_H: i32 = 50;

/// Where everything sits for a given window size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    pub width:          i32,
    pub height:         i32,
    pub play_width:     i32,
    pub start_button:   Rect,
    pub restart_button: Rect,
    pub quit_button:    Rect,
}

impl Layout {
    pub fn new(window: &WindowConfig) -> Self {
        let w = window.width as i32;
        let h = window.height as i32;
        Layout {
            width:          w,
            height:         h,
            play_width:     window.play_width() as i32,
            start_button:   Rect::new(w / 2 - 100, h / 2,      BUTTON_W, BUTTON_H),
            restart_button: Rect::new(w / 2 - 220, h / 2 + 50, BUTTON_W, BUTTON_H),
            quit_button:    Rect::new(w / 2 + 20,  h / 2 + 50, BUTTON_W, BUTTON_H),
        }
    }

    /// Camera panel to the right of the play area.
    pub fn panel(&self) -> Rect {
        Rect::new(self.play_width, 0, self.width - self.play_width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_buttons() {
        let l = Layout::new(&WindowConfig::default());
        assert_eq!(l.play_width, 600);
        assert_eq!(l.start_button, Rect::new(300, 300, 200, 50));
        assert_eq!(l.restart_button, Rect::new(180, 350, 200, 50));
        assert_eq!(l.quit_button, Rect::new(420, 350, 200, 50));
        assert_eq!(l.panel(), Rect::new(600, 0, 200, 600));
    }

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(10, 10, 5, 5);
        assert!(r.contains(10.0, 10.0));
        assert!(r.contains(14.9, 14.9));
        assert!(!r.contains(15.0, 12.0));
        assert!(!r.contains(9.9, 12.0));
    }

    #[test]
    fn restart_and_quit_do_not_overlap() {
        let l = Layout::new(&WindowConfig::default());
        let (cx, cy) = l.restart_button.center();
        assert!(!l.quit_button.contains(cx as f32, cy as f32));
        let (cx, cy) = l.quit_button.center();
        assert!(!l.restart_button.contains(cx as f32, cy as f32));
    }
}
