//! Build progress lines
//!
//! `Compiling ==> shaders/foo.vert` style messages. Colors are only used when
//! stdout is a terminal, so redirected build logs stay free of escape codes.

use std::io::IsTerminal;
use std::path::Path;

const CYAN: &str = "\x1b[96m";
const PURPLE: &str = "\x1b[95m";
const BLUE: &str = "\x1b[94m";
const GREEN: &str = "\x1b[92m";
const YELLOW: &str = "\x1b[93m";
const RED: &str = "\x1b[91m";
const RESET: &str = "\x1b[0m";

/// Color palette, blank when colors are disabled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Palette {
    cyan: &'static str,
    purple: &'static str,
    blue: &'static str,
    green: &'static str,
    yellow: &'static str,
    red: &'static str,
    reset: &'static str,
}

impl Palette {
    const COLORED: Palette = Palette {
        cyan: CYAN,
        purple: PURPLE,
        blue: BLUE,
        green: GREEN,
        yellow: YELLOW,
        red: RED,
        reset: RESET,
    };

    const PLAIN: Palette = Palette {
        cyan: "",
        purple: "",
        blue: "",
        green: "",
        yellow: "",
        red: "",
        reset: "",
    };
}

/// Formats driver progress messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildMessages {
    palette: Palette,
}

impl BuildMessages {
    /// Colored output when stdout is a terminal
    pub fn detect() -> Self {
        Self::new(std::io::stdout().is_terminal())
    }

    pub fn new(colored: bool) -> Self {
        Self {
            palette: if colored { Palette::COLORED } else { Palette::PLAIN },
        }
    }

    pub fn compiling(&self, source: &Path) -> String {
        let p = &self.palette;
        format!(
            "{}Compiling {}==> {}{}{}",
            p.blue,
            p.purple,
            p.yellow,
            source.display(),
            p.reset
        )
    }

    pub fn generated(&self, fragment: &Path) -> String {
        let p = &self.palette;
        format!(
            "{}Generating Header      {}==> {}{}{}",
            p.green,
            p.purple,
            p.yellow,
            fragment.display(),
            p.reset
        )
    }

    pub fn failed(&self, source: &Path) -> String {
        let p = &self.palette;
        format!(
            "{}Shader Failed          {}==> {}{}{}",
            p.red,
            p.purple,
            p.yellow,
            source.display(),
            p.reset
        )
    }

    pub fn summary(&self, embedded: usize) -> String {
        let p = &self.palette;
        format!("{}Embedded {} shader(s){}", p.cyan, embedded, p.reset)
    }
}
