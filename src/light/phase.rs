use std::fmt;

// ===========================================================================
// ** Phase **
// ===========================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    #[default]
    Red,
    Green,
}

impl Phase {
    // -----------------------------------------------------------------------

    pub fn toggled(self) -> Self {
        match self {
            Phase::Red => Phase::Green,
            Phase::Green => Phase::Red,
        }
    }

    // -----------------------------------------------------------------------

    pub fn is_green(self) -> bool {
        self == Phase::Green
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Red => f.write_str("red"),
            Phase::Green => f.write_str("green"),
        }
    }
}

// ===========================================================================
// ** TESTS **
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // -----------------------------------------------------------------------

    #[test]
    fn starts_red() {
        assert_eq!(Phase::default(), Phase::Red);
        assert!(!Phase::default().is_green());
    }

    // -----------------------------------------------------------------------

    #[test]
    fn display() {
        assert_eq!(Phase::Red.to_string(), "red");
        assert_eq!(Phase::Green.to_string(), "green");
    }

    proptest! {
        // an even number of toggles returns to the start, an odd number flips
        #[test]
        fn toggles_alternate(start_green in any::<bool>(), count in 0usize..64) {
            let start = if start_green { Phase::Green } else { Phase::Red };
            let end = (0..count).fold(start, |phase, _| phase.toggled());

            if count % 2 == 0 {
                prop_assert_eq!(end, start);
            } else {
                prop_assert_eq!(end, start.toggled());
            }
        }
    }
}
