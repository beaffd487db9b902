//! Nayin (sound-element) labels of the sexagenary cycle.
//!
//! Each label covers two consecutive cycle positions: 甲子/乙丑 share
//! 海中金, 丙寅/丁卯 share 炉中火, and so on through 壬戌/癸亥 (大海水).

use serde::Serialize;

use crate::element::Element;

/// One of the 30 nayin labels; the index is `cycle_index / 2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Nayin(u8);

const NAYIN_NAMES: [&str; 30] = [
    "海中金", "炉中火", "大林木", "路旁土", "剑锋金", "山头火", "涧下水", "城头土", "白蜡金", "杨柳木",
    "泉中水", "屋上土", "霹雳火", "松柏木", "长流水", "砂中金", "山下火", "平地木", "壁上土", "金箔金",
    "覆灯火", "天河水", "大驿土", "钗钏金", "桑柘木", "大溪水", "沙中土", "天上火", "石榴木", "大海水",
];

const NAYIN_ELEMENTS: [Element; 30] = {
    use Element::*;
    [
        Metal, Fire, Wood, Earth, Metal, Fire, Water, Earth, Metal, Wood, //
        Water, Earth, Fire, Wood, Water, Metal, Fire, Wood, Earth, Metal, //
        Fire, Water, Earth, Metal, Wood, Water, Earth, Fire, Wood, Water,
    ]
};

impl Nayin {
    /// Label for a 0-based sexagenary position; wraps modulo 60.
    pub const fn from_cycle_index(cycle_index: u8) -> Self {
        Self((cycle_index % 60) / 2)
    }

    /// 0-based label index (0..30).
    pub const fn index(self) -> u8 {
        self.0
    }

    pub const fn name(self) -> &'static str {
        NAYIN_NAMES[self.0 as usize]
    }

    /// Element carried by the label (its last character).
    pub const fn element(self) -> Element {
        NAYIN_ELEMENTS[self.0 as usize]
    }
}

impl std::fmt::Display for Nayin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
