//! Line colour assignment.

/// Colours handed out to lines, in order. Wraps after the last one.
pub const PALETTE: [&str; 12] = [
    "#1677ff", "#52c41a", "#fa541c", "#722ed1", "#eb2f96", "#faad14", "#13c2c2", "#2f54eb",
    "#f5222d", "#a0d911", "#1890ff", "#fa8c16",
];

/// Monotonically advancing position in [`PALETTE`].
///
/// One cursor lives for one discovery cycle. It is never rewound mid-cycle,
/// so colours stay stable and do not repeat until the palette wraps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorCursor {
    next: usize,
}

impl ColorCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the next colour.
    pub fn advance(&mut self) -> &'static str {
        let color = PALETTE[self.next % PALETTE.len()];
        self.next += 1;
        color
    }

    /// Number of colours handed out so far.
    pub fn issued(&self) -> usize {
        self.next
    }
}
