//! Chart shortcut inputs.
//!
//! A handful of literal inputs are answered with fixed `#` tokens that the
//! web client turns into chart widgets. They never reach the completion
//! service. Matching is exact; only `Graph` also accepts a lowercase form.

/// A chart-trigger keyword recognized by the generate endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartShortcut {
    Graph,
    BarPlot,
    PiePlot,
    ScatterPlot,
    LinePlot,
}

impl ChartShortcut {
    /// Match an input string against the shortcut table.
    pub fn from_input(input: &str) -> Option<Self> {
        match input {
            "Graph" | "graph" => Some(Self::Graph),
            "BarPlot" => Some(Self::BarPlot),
            "PiePlot" => Some(Self::PiePlot),
            "ScatterPlot" => Some(Self::ScatterPlot),
            "LinePlot" => Some(Self::LinePlot),
            _ => None,
        }
    }

    /// The canned reply stored and returned for this shortcut.
    pub fn reply(self) -> &'static str {
        match self {
            Self::Graph => "#",
            Self::BarPlot => "#1",
            Self::PiePlot => "#2",
            Self::ScatterPlot => "#3",
            Self::LinePlot => "#4",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortcut_replies() {
        let cases = [
            ("Graph", "#"),
            ("graph", "#"),
            ("BarPlot", "#1"),
            ("PiePlot", "#2"),
            ("ScatterPlot", "#3"),
            ("LinePlot", "#4"),
        ];
        for (input, reply) in cases {
            let shortcut = ChartShortcut::from_input(input).unwrap();
            assert_eq!(shortcut.reply(), reply, "input {input}");
        }
    }

    #[test]
    fn test_shortcut_matching_is_exact() {
        for input in ["GRAPH", "barplot", "Bar Plot", " PiePlot", "LinePlot ", "Graphs", ""] {
            assert!(ChartShortcut::from_input(input).is_none(), "input {input:?}");
        }
    }
}
