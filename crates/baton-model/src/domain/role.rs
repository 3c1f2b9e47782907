use serde::{Deserialize, Serialize};

/// Which half of the sequence a worker owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    /// Emits 1, 3, 5, ...
    Odd,
    /// Emits 2, 4, 6, ...
    Even,
}

impl Role {
    /// First value this role emits.
    #[inline]
    pub const fn first(&self) -> u64 {
        match self {
            Role::Odd => 1,
            Role::Even => 2,
        }
    }

    /// The role this one hands its turn to.
    #[inline]
    pub const fn peer(&self) -> Role {
        match self {
            Role::Odd => Role::Even,
            Role::Even => Role::Odd,
        }
    }

    /// Returns `true` if `value` has this role's parity.
    #[inline]
    pub const fn owns(&self, value: u64) -> bool {
        match self {
            Role::Odd => value % 2 == 1,
            Role::Even => value % 2 == 0,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Odd => "odd",
            Role::Even => "even",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parity_ownership() {
        assert!(Role::Odd.owns(1));
        assert!(Role::Odd.owns(9));
        assert!(!Role::Odd.owns(2));
        assert!(Role::Even.owns(2));
        assert!(!Role::Even.owns(3));
    }

    #[test]
    fn peers_are_symmetric() {
        assert_eq!(Role::Odd.peer(), Role::Even);
        assert_eq!(Role::Even.peer(), Role::Odd);
        assert_eq!(Role::Odd.peer().peer(), Role::Odd);
    }
}
