use crate::data::model::TernaryPoint;

// ---------------------------------------------------------------------------
// Triangle geometry: boundary, gridlines, ticks, label anchors
// ---------------------------------------------------------------------------

/// Which side of the triangle a tick or caption belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Butanol–water binary, along the bottom.
    Bottom,
    /// Acetone–water binary, from the water corner to the apex.
    Right,
    /// Acetone–butanol binary, from the apex down to the butanol corner.
    Left,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub edge: Edge,
    /// Value shown next to the tick.
    pub value: f64,
    /// Where the tick meets the edge.
    pub base: [f64; 2],
    /// Outer end of the tick mark.
    pub tip: [f64; 2],
}

fn project(water: f64, acetone: f64, butanol: f64) -> [f64; 2] {
    TernaryPoint::new(water, acetone, butanol).to_cartesian()
}

/// Positions `interval, 2·interval, ..` strictly inside `(0, scale)`.
fn steps(scale: f64, interval: f64) -> Vec<f64> {
    if interval <= 0.0 || scale <= 0.0 {
        return Vec::new();
    }
    let n = (scale / interval).round() as usize;
    (1..n)
        .map(|i| i as f64 * interval)
        .filter(|&v| v < scale)
        .collect()
}

/// Closed outline: butanol corner, water corner, acetone apex.
pub fn boundary(scale: f64) -> Vec<[f64; 2]> {
    vec![
        project(0.0, 0.0, scale),
        project(scale, 0.0, 0.0),
        project(0.0, scale, 0.0),
        project(0.0, 0.0, scale),
    ]
}

/// Lines of constant water, acetone and butanol every `interval` units.
pub fn gridlines(scale: f64, interval: f64) -> Vec<[[f64; 2]; 2]> {
    let mut lines = Vec::new();
    for v in steps(scale, interval) {
        let rest = scale - v;
        lines.push([project(v, 0.0, rest), project(v, rest, 0.0)]);
        lines.push([project(0.0, v, rest), project(rest, v, 0.0)]);
        lines.push([project(rest, 0.0, v), project(0.0, rest, v)]);
    }
    lines
}

/// Tick marks on all three edges, including the corners.
///
/// Bottom ticks read water, right ticks acetone, left ticks butanol.
pub fn ticks(scale: f64, interval: f64) -> Vec<Tick> {
    let len = scale * 0.02;
    let (sin60, cos60) = (3f64.sqrt() / 2.0, 0.5);
    let mut values = vec![0.0];
    values.extend(steps(scale, interval));
    values.push(scale);

    let mut out = Vec::with_capacity(values.len() * 3);
    for &v in &values {
        let base = project(v, 0.0, scale - v);
        out.push(Tick {
            edge: Edge::Bottom,
            value: v,
            base,
            tip: [base[0] - len * cos60, base[1] - len * sin60],
        });

        let base = project(scale - v, v, 0.0);
        out.push(Tick {
            edge: Edge::Right,
            value: v,
            base,
            tip: [base[0] + len, base[1]],
        });

        let base = project(0.0, scale - v, v);
        out.push(Tick {
            edge: Edge::Left,
            value: v,
            base,
            tip: [base[0] - len * cos60, base[1] + len * sin60],
        });
    }
    out
}

/// Anchor points for the right, top and left corner captions.
pub fn corner_anchors(scale: f64) -> [[f64; 2]; 3] {
    let pad = scale * 0.04;
    let [rx, ry] = project(scale, 0.0, 0.0);
    let [tx, ty] = project(0.0, scale, 0.0);
    let [lx, ly] = project(0.0, 0.0, scale);
    [[rx + pad, ry - pad], [tx, ty + pad], [lx - pad, ly - pad]]
}

/// Anchor point for an edge caption, pushed outward from the edge midpoint.
pub fn edge_anchor(scale: f64, edge: Edge) -> [f64; 2] {
    let offset = scale * 0.12;
    let half = scale / 2.0;
    let (sin60, cos60) = (3f64.sqrt() / 2.0, 0.5);
    match edge {
        Edge::Bottom => {
            let [x, y] = project(half, 0.0, half);
            [x, y - offset]
        }
        Edge::Right => {
            let [x, y] = project(half, half, 0.0);
            [x + offset * sin60, y + offset * cos60]
        }
        Edge::Left => {
            let [x, y] = project(0.0, half, half);
            [x - offset * sin60, y + offset * cos60]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: [f64; 2], b: [f64; 2]) -> bool {
        (a[0] - b[0]).abs() < 1e-9 && (a[1] - b[1]).abs() < 1e-9
    }

    #[test]
    fn test_boundary_is_closed_triangle() {
        let b = boundary(100.0);
        assert_eq!(b.len(), 4);
        assert_eq!(b[0], b[3]);
        assert!(close(b[1], [100.0, 0.0]));
        assert!(close(b[2], [50.0, 50.0 * 3f64.sqrt()]));
    }

    #[test]
    fn test_gridlines_default_interval() {
        let lines = gridlines(100.0, 10.0);
        assert_eq!(lines.len(), 27);
        // Constant-acetone lines are horizontal.
        for [a, b] in lines.iter().skip(1).step_by(3) {
            assert!((a[1] - b[1]).abs() < 1e-9);
        }
    }

    #[test]
    fn test_gridlines_ignore_bad_interval() {
        assert!(gridlines(100.0, 0.0).is_empty());
        assert!(gridlines(100.0, 100.0).is_empty());
    }

    #[test]
    fn test_ticks_cover_every_edge() {
        let ticks = ticks(100.0, 10.0);
        assert_eq!(ticks.len(), 33);
        for edge in [Edge::Bottom, Edge::Right, Edge::Left] {
            let values: Vec<f64> = ticks
                .iter()
                .filter(|t| t.edge == edge)
                .map(|t| t.value)
                .collect();
            assert_eq!(values.len(), 11);
            assert_eq!(values[0], 0.0);
            assert_eq!(values[10], 100.0);
        }
        let right_top = ticks
            .iter()
            .find(|t| t.edge == Edge::Right && t.value == 100.0)
            .unwrap();
        assert!(close(right_top.base, [50.0, 50.0 * 3f64.sqrt()]));
    }
}
