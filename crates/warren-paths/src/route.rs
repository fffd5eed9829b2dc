//! Route assembly over an ordered waypoint list.
//!
//! The assembler validates the waypoint list up front, resets the grid's
//! transient search state, then runs one [`WaveSearch`] per consecutive
//! pair. An unreachable pair yields a `None` segment and the remaining
//! pairs still run — partial routes are a reported condition, not an abort.

use log::{debug, warn};
use rand::Rng;

use warren_core::{CellKind, MazeGrid, Point};

use crate::wave::{PathError, WaveSearch};

/// The assembled route: one segment per consecutive waypoint pair, in
/// order. `None` marks a pair no open corridor connects.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    pub segments: Vec<Option<Vec<Point>>>,
}

impl Route {
    /// Whether every pair was connected.
    pub fn is_complete(&self) -> bool {
        self.segments.iter().all(Option::is_some)
    }

    /// All successful segments concatenated in order.
    pub fn concatenated(&self) -> Vec<Point> {
        self.segments.iter().flatten().flatten().copied().collect()
    }
}

/// Check a waypoint list without touching the grid.
///
/// At least two entries, all in bounds and non-Wall, no consecutive
/// repeats. Runs before any pathfinding work starts.
pub fn validate_waypoints(grid: &MazeGrid, waypoints: &[Point]) -> Result<(), PathError> {
    if waypoints.len() < 2 {
        return Err(PathError::TooFewWaypoints(waypoints.len()));
    }
    for &w in waypoints {
        let kind = grid
            .kind(w)
            .map_err(|_| PathError::WaypointOutOfBounds(w))?;
        if kind.is_wall() {
            return Err(PathError::WaypointOnWall(w));
        }
    }
    for pair in waypoints.windows(2) {
        if pair[0] == pair[1] {
            return Err(PathError::DuplicateWaypoint(pair[0]));
        }
    }
    Ok(())
}

/// Assemble a route visiting `waypoints` in order.
///
/// Preparation clears every distance label, demotes swept cells back to
/// untouched (cells already on a path keep their kind), marks the
/// waypoints themselves as on-path, and rebuilds the neighbor cache —
/// wall/open kinds may have changed since the last run. Each consecutive
/// pair then gets a wave search; cells of every successful segment are
/// set [`CellKind::OnPath`] once all pairs have run.
pub fn assemble<R: Rng>(
    grid: &mut MazeGrid,
    waypoints: &[Point],
    rng: &mut R,
) -> Result<Route, PathError> {
    validate_waypoints(grid, waypoints)?;

    grid.clear_all_labels();
    let swept: Vec<Point> = grid
        .iter()
        .filter(|(_, c)| c.kind == CellKind::OpenVisited)
        .map(|(p, _)| p)
        .collect();
    for p in swept {
        grid.set_kind(p, CellKind::OpenUnvisited)?;
    }
    for &w in waypoints {
        grid.set_kind(w, CellKind::OnPath)?;
    }
    grid.rebuild_neighbor_cache();

    let mut segments = Vec::with_capacity(waypoints.len() - 1);
    for pair in waypoints.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        let mut search = WaveSearch::new(grid, from, to)?;
        match search.run(grid, rng) {
            Ok(path) => segments.push(Some(path)),
            Err(PathError::Unreachable { from, to }) => {
                warn!("skipping unreachable segment {from} -> {to}");
                segments.push(None);
            }
            Err(other) => return Err(other),
        }
    }

    for segment in segments.iter().flatten() {
        for &p in segment {
            grid.set_kind(p, CellKind::OnPath)?;
        }
    }

    let connected = segments.iter().filter(|s| s.is_some()).count();
    debug!(
        "route assembled: {connected}/{} segments connected",
        segments.len()
    );
    Ok(Route { segments })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use warren_core::{GridConfig, MazeGrid};
    use warren_gen::MazeGen;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    fn grid_with_open(open: &[Point]) -> MazeGrid {
        let mut kinds = vec![CellKind::Wall; 25];
        for q in open {
            kinds[(q.y * 5 + q.x) as usize] = CellKind::OpenUnvisited;
        }
        MazeGrid::from_kinds(5, 5, kinds).unwrap()
    }

    #[test]
    fn waypoint_list_rejection() {
        let grid = grid_with_open(&[p(1, 1), p(2, 1)]);
        assert!(matches!(
            validate_waypoints(&grid, &[p(1, 1)]),
            Err(PathError::TooFewWaypoints(1))
        ));
        assert!(matches!(
            validate_waypoints(&grid, &[p(1, 1), p(0, 0)]),
            Err(PathError::WaypointOnWall(_))
        ));
        assert!(matches!(
            validate_waypoints(&grid, &[p(1, 1), p(9, 9)]),
            Err(PathError::WaypointOutOfBounds(_))
        ));
        assert!(matches!(
            validate_waypoints(&grid, &[p(1, 1), p(1, 1)]),
            Err(PathError::DuplicateWaypoint(_))
        ));
        assert!(validate_waypoints(&grid, &[p(1, 1), p(2, 1)]).is_ok());
    }

    #[test]
    fn unreachable_pair_yields_null_segment_without_abort() {
        // A-B share a corridor; C is open but sealed off.
        let a = p(1, 1);
        let b = p(3, 1);
        let c = p(3, 3);
        let mut grid = grid_with_open(&[a, p(2, 1), b, c]);
        let mut rng = StdRng::seed_from_u64(4);

        let route = assemble(&mut grid, &[a, b, c], &mut rng).unwrap();
        assert_eq!(route.segments.len(), 2);
        assert_eq!(route.segments[0], Some(vec![a, p(2, 1), b]));
        assert_eq!(route.segments[1], None);
        assert!(!route.is_complete());
        assert_eq!(route.concatenated(), vec![a, p(2, 1), b]);
    }

    #[test]
    fn successful_segments_are_marked_on_path() {
        let a = p(1, 1);
        let b = p(3, 1);
        let mut grid = grid_with_open(&[a, p(2, 1), b]);
        let mut rng = StdRng::seed_from_u64(4);

        let route = assemble(&mut grid, &[a, b], &mut rng).unwrap();
        assert!(route.is_complete());
        for q in [a, p(2, 1), b] {
            assert_eq!(grid.kind(q).unwrap(), CellKind::OnPath);
        }
    }

    #[test]
    fn reruns_reset_swept_state() {
        let a = p(1, 1);
        let b = p(3, 1);
        let mut grid = grid_with_open(&[a, p(2, 1), b, p(1, 2), p(1, 3)]);
        let mut rng = StdRng::seed_from_u64(4);

        assemble(&mut grid, &[a, b], &mut rng).unwrap();
        // The dead-end spur got swept by the wave.
        assert_eq!(grid.kind(p(1, 2)).unwrap(), CellKind::OpenVisited);

        // A second route over the same grid starts from a clean slate.
        assemble(&mut grid, &[a, p(1, 3)], &mut rng).unwrap();
        assert_eq!(grid.kind(p(1, 3)).unwrap(), CellKind::OnPath);
        assert_eq!(grid.kind(p(1, 2)).unwrap(), CellKind::OnPath);
    }

    #[test]
    fn multi_leg_route_through_generated_maze() {
        let mut template_rng = StdRng::seed_from_u64(33);
        let mut grid =
            MazeGrid::template(GridConfig::new(9, 9).unwrap(), &mut template_rng);
        MazeGen::new(&mut grid).unwrap().run(&mut grid).unwrap();

        let waypoints = [p(1, 1), p(7, 7), p(1, 7)];
        let mut rng = StdRng::seed_from_u64(5);
        let route = assemble(&mut grid, &waypoints, &mut rng).unwrap();
        assert!(route.is_complete());

        let legs: Vec<&Vec<Point>> = route.segments.iter().flatten().collect();
        assert_eq!(legs[0].first(), Some(&p(1, 1)));
        assert_eq!(legs[0].last(), Some(&p(7, 7)));
        assert_eq!(legs[1].first(), Some(&p(7, 7)));
        assert_eq!(legs[1].last(), Some(&p(1, 7)));
    }
}
