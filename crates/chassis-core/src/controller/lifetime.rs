//! Screen Lifetime
//!
//! Shared flag telling async work whether the screen that started it is
//! still mounted. Clones observe the same flag.

use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Clone)]
pub struct ScreenLifetime(Rc<Cell<bool>>);

impl Default for ScreenLifetime {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenLifetime {
    pub fn new() -> Self {
        Self(Rc::new(Cell::new(true)))
    }

    pub fn is_alive(&self) -> bool {
        self.0.get()
    }

    pub fn end(&self) {
        self.0.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_the_flag() {
        let screen = ScreenLifetime::new();
        let task = screen.clone();
        assert!(task.is_alive());
        screen.end();
        assert!(!task.is_alive());
    }
}
