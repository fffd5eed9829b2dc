//! The cell model: [`CellKind`], [`PresentationHint`] and [`Cell`].

/// The state of a single grid cell.
///
/// A closed variant set: walls block movement, the three open kinds are all
/// traversable and only differ in how a host may want to present them.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    /// Impassable cell.
    Wall,
    /// Traversable cell not yet touched by a search.
    #[default]
    OpenUnvisited,
    /// Traversable cell swept by a wave expansion.
    OpenVisited,
    /// Traversable cell lying on an assembled route (or picked as a
    /// waypoint).
    OnPath,
}

/// Renderer-neutral drawing hint derived from a [`CellKind`].
///
/// The engine never touches pixels; this is the whole of its presentation
/// vocabulary.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PresentationHint {
    Wall,
    Floor,
    Swept,
    Route,
}

impl CellKind {
    /// Whether the cell blocks movement.
    #[inline]
    pub const fn is_wall(self) -> bool {
        matches!(self, Self::Wall)
    }

    /// Whether the cell is traversable (any non-Wall kind).
    #[inline]
    pub const fn is_open(self) -> bool {
        !self.is_wall()
    }

    /// Pure mapping from kind to a presentation hint.
    #[inline]
    pub const fn hint(self) -> PresentationHint {
        match self {
            Self::Wall => PresentationHint::Wall,
            Self::OpenUnvisited => PresentationHint::Floor,
            Self::OpenVisited => PresentationHint::Swept,
            Self::OnPath => PresentationHint::Route,
        }
    }
}

/// A single grid cell: its kind plus the transient carve weight.
///
/// The weight exists only on interior Wall cells that are still candidate
/// edges for the maze generator; it is cleared once the candidate is
/// resolved (carved open or kept as a permanent wall).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub kind: CellKind,
    pub carve_weight: Option<u32>,
}

impl Cell {
    /// A plain cell of the given kind, with no carve weight.
    #[inline]
    pub const fn new(kind: CellKind) -> Self {
        Self {
            kind,
            carve_weight: None,
        }
    }

    /// A candidate wall carrying a carve weight.
    #[inline]
    pub const fn candidate(weight: u32) -> Self {
        Self {
            kind: CellKind::Wall,
            carve_weight: Some(weight),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_predicates() {
        assert!(CellKind::Wall.is_wall());
        assert!(!CellKind::Wall.is_open());
        for kind in [
            CellKind::OpenUnvisited,
            CellKind::OpenVisited,
            CellKind::OnPath,
        ] {
            assert!(kind.is_open());
            assert!(!kind.is_wall());
        }
    }

    #[test]
    fn hint_is_total_and_distinct() {
        assert_eq!(CellKind::Wall.hint(), PresentationHint::Wall);
        assert_eq!(CellKind::OpenUnvisited.hint(), PresentationHint::Floor);
        assert_eq!(CellKind::OpenVisited.hint(), PresentationHint::Swept);
        assert_eq!(CellKind::OnPath.hint(), PresentationHint::Route);
    }

    #[test]
    fn candidate_carries_weight() {
        let c = Cell::candidate(17);
        assert!(c.kind.is_wall());
        assert_eq!(c.carve_weight, Some(17));
        assert_eq!(Cell::new(CellKind::Wall).carve_weight, None);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn cell_round_trip() {
        let c = Cell::candidate(5);
        let json = serde_json::to_string(&c).unwrap();
        let back: Cell = serde_json::from_str(&json).unwrap();
        assert_eq!(c, back);
    }
}
