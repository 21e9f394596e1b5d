//! Connection endpoint syntax: `block` or `block.port`.

use std::fmt;

/// Which port of a block an endpoint designates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortSelector {
    /// The block's output.
    Output,
    /// Data input `N`.
    Input(usize),
    /// The clock input.
    Clock,
}

impl fmt::Display for PortSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortSelector::Output => f.write_str("out"),
            PortSelector::Input(0) => f.write_str("in"),
            PortSelector::Input(n) => write!(f, "in{n}"),
            PortSelector::Clock => f.write_str("clock"),
        }
    }
}

/// A parsed endpoint string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint<'a> {
    /// Block name.
    pub block: &'a str,
    /// Port suffix after the first `.`, if any.
    pub port: Option<&'a str>,
}

impl<'a> Endpoint<'a> {
    /// Splits `text` at its first `.`.
    pub fn parse(text: &'a str) -> Self {
        match text.split_once('.') {
            Some((block, port)) => Self {
                block,
                port: Some(port),
            },
            None => Self {
                block: text,
                port: None,
            },
        }
    }

    /// Port this endpoint selects when used as a wire source. Only the output
    /// (`block` or `block.out`) qualifies.
    pub fn source_selector(&self) -> Option<PortSelector> {
        match self.port {
            None | Some("out") => Some(PortSelector::Output),
            Some(_) => None,
        }
    }

    /// Port this endpoint selects when used as a wire target: `block` and
    /// `block.in` pick data input 0, `block.inN` data input `N`, and
    /// `block.clock` the clock input.
    pub fn target_selector(&self) -> Option<PortSelector> {
        match self.port {
            None | Some("in") => Some(PortSelector::Input(0)),
            Some("clock") => Some(PortSelector::Clock),
            Some(port) => port
                .strip_prefix("in")
                .and_then(|n| n.parse().ok())
                .map(PortSelector::Input),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_forms() {
        assert_eq!(
            Endpoint::parse("sh").target_selector(),
            Some(PortSelector::Input(0))
        );
        assert_eq!(
            Endpoint::parse("sh.in").target_selector(),
            Some(PortSelector::Input(0))
        );
        assert_eq!(
            Endpoint::parse("add.in1").target_selector(),
            Some(PortSelector::Input(1))
        );
        assert_eq!(
            Endpoint::parse("sh.clock").target_selector(),
            Some(PortSelector::Clock)
        );
        assert_eq!(Endpoint::parse("sh.gate").target_selector(), None);
        assert_eq!(Endpoint::parse("sh.in-1").target_selector(), None);
    }

    #[test]
    fn source_forms() {
        assert_eq!(
            Endpoint::parse("sig").source_selector(),
            Some(PortSelector::Output)
        );
        assert_eq!(
            Endpoint::parse("sig.out").source_selector(),
            Some(PortSelector::Output)
        );
        assert_eq!(Endpoint::parse("sig.clock").source_selector(), None);
    }

    #[test]
    fn splits_at_first_dot() {
        let e = Endpoint::parse("a.in1");
        assert_eq!(e.block, "a");
        assert_eq!(e.port, Some("in1"));
    }

    #[test]
    fn selector_display_matches_syntax() {
        assert_eq!(PortSelector::Input(0).to_string(), "in");
        assert_eq!(PortSelector::Input(2).to_string(), "in2");
        assert_eq!(PortSelector::Clock.to_string(), "clock");
    }
}
