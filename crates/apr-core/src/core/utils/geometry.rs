use nalgebra::Point3;

pub fn distance(a: &Point3<f64>, b: &Point3<f64>) -> f64 {
    nalgebra::distance(a, b)
}

/// The angle at `b` formed by `a-b-c`, in radians within `[0, π]`.
pub fn angle(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> f64 {
    let ba = a - b;
    let bc = c - b;
    ba.angle(&bc)
}

/// The signed torsion angle of `a-b-c-d`, in radians within `(-π, π]`.
pub fn dihedral(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>, d: &Point3<f64>) -> f64 {
    let b1 = b - a;
    let b2 = c - b;
    let b3 = d - c;

    let n1 = b1.cross(&b2);
    let n2 = b2.cross(&b3);

    let y = n1.cross(&n2).dot(&b2.normalize());
    let x = n1.dot(&n2);
    y.atan2(x)
}

/// The geometric center (unweighted mean) of a set of points.
///
/// Returns `None` for an empty set.
pub fn centroid<'a>(points: impl IntoIterator<Item = &'a Point3<f64>>) -> Option<Point3<f64>> {
    let mut count = 0usize;
    let sum = points.into_iter().fold(Point3::origin(), |acc, p| {
        count += 1;
        acc + p.coords
    });
    (count > 0).then(|| sum / count as f64)
}
