//! Shape descriptors that feed box construction
//!
//! A shape here is only a source of local min/max corners. How a shape is
//! tessellated for drawing is not this module's concern; the curved shapes
//! sample the same rim/lattice points their meshes use so the corners match
//! what would be drawn.

use crate::foundation::math::{utils, Vec2, Vec3};
use thiserror::Error;

/// Axis-aligned min/max corners in a shape's object space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Bounds {
    /// Create bounds from two corners (not reordered)
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Sweep a point cloud for its componentwise minimum and maximum
    pub fn from_points<I>(points: I) -> Result<Self, ShapeError>
    where
        I: IntoIterator<Item = Vec3>,
    {
        let mut iter = points.into_iter();
        let first = iter.next().ok_or(ShapeError::EmptyPointCloud)?;

        let (min, max) = iter.fold((first, first), |(min, max), p| (min.inf(&p), max.sup(&p)));
        Ok(Self { min, max })
    }

    /// Full size along each axis
    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Capability shared by everything that can be wrapped in a bounding box
pub trait LocalBounds {
    /// Object-space corners of the shape
    fn local_bounds(&self) -> Bounds;
}

/// Shape construction errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    /// Triangle vertices lie on one line
    #[error("the 3 vertices are collinear, no such triangle exists")]
    CollinearTriangle,

    /// A size component was zero or negative
    #[error("every dimension of the {shape} size must be positive, got {size:?}")]
    NonPositiveSize {
        /// Shape name
        shape: &'static str,
        /// Offending size
        size: Vec3,
    },

    /// Radius below zero
    #[error("{shape} radius must not be negative, got {radius}")]
    NegativeRadius {
        /// Shape name
        shape: &'static str,
        /// Offending radius
        radius: f32,
    },

    /// Too few tessellation steps for a curved shape
    #[error("{shape} needs at least {min} steps, got {steps}")]
    TooFewSteps {
        /// Shape name
        shape: &'static str,
        /// Requested steps
        steps: u32,
        /// Minimum accepted
        min: u32,
    },

    /// NaN or infinite parameter
    #[error("{0} parameters must be finite")]
    NonFinite(&'static str),

    /// No points to bound
    #[error("cannot compute bounds of an empty point cloud")]
    EmptyPointCloud,
}

/// Minimum tessellation steps accepted by circles and spheres
pub const MIN_CURVE_STEPS: u32 = 4;

fn check_finite(shape: &'static str, values: &[f32]) -> Result<(), ShapeError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(ShapeError::NonFinite(shape))
    }
}

fn check_curve(shape: &'static str, radius: f32, steps: u32) -> Result<(), ShapeError> {
    if radius < 0.0 {
        return Err(ShapeError::NegativeRadius { shape, radius });
    }
    if steps < MIN_CURVE_STEPS {
        return Err(ShapeError::TooFewSteps { shape, steps, min: MIN_CURVE_STEPS });
    }
    Ok(())
}

/// Triangle in the z = 0 plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleShape {
    v1: Vec2,
    v2: Vec2,
    v3: Vec2,
}

impl TriangleShape {
    /// Create a triangle, rejecting collinear vertices
    pub fn new(v1: Vec2, v2: Vec2, v3: Vec2) -> Result<Self, ShapeError> {
        check_finite("triangle", &[v1.x, v1.y, v2.x, v2.y, v3.x, v3.y])?;

        let doubled_area = v1.x * (v2.y - v3.y) + v2.x * (v3.y - v1.y) + v3.x * (v1.y - v2.y);
        if doubled_area == 0.0 {
            return Err(ShapeError::CollinearTriangle);
        }

        Ok(Self { v1, v2, v3 })
    }
}

impl LocalBounds for TriangleShape {
    fn local_bounds(&self) -> Bounds {
        let flat = |v: Vec2| Vec3::new(v.x, v.y, 0.0);
        let min = flat(self.v1.inf(&self.v2).inf(&self.v3));
        let max = flat(self.v1.sup(&self.v2).sup(&self.v3));
        Bounds::new(min, max)
    }
}

/// Rectangle in the z = 0 plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadShape {
    center: Vec2,
    size: Vec2,
}

impl QuadShape {
    /// Create a quad, rejecting non-positive sizes
    pub fn new(center: Vec2, size: Vec2) -> Result<Self, ShapeError> {
        check_finite("quad", &[center.x, center.y, size.x, size.y])?;
        if size.x <= 0.0 || size.y <= 0.0 {
            return Err(ShapeError::NonPositiveSize {
                shape: "quad",
                size: Vec3::new(size.x, size.y, 0.0),
            });
        }
        Ok(Self { center, size })
    }
}

impl LocalBounds for QuadShape {
    fn local_bounds(&self) -> Bounds {
        let half = self.size * 0.5;
        Bounds::new(
            Vec3::new(self.center.x - half.x, self.center.y - half.y, 0.0),
            Vec3::new(self.center.x + half.x, self.center.y + half.y, 0.0),
        )
    }
}

/// Disc in the z = 0 plane, sampled with `steps` rim points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleShape {
    center: Vec2,
    radius: f32,
    steps: u32,
}

impl CircleShape {
    /// Create a circle
    pub fn new(center: Vec2, radius: f32, steps: u32) -> Result<Self, ShapeError> {
        check_finite("circle", &[center.x, center.y, radius])?;
        check_curve("circle", radius, steps)?;
        Ok(Self { center, radius, steps })
    }

    fn rim_points(&self) -> impl Iterator<Item = Vec3> + '_ {
        let angle_step = 2.0 * std::f32::consts::PI / self.steps as f32;
        (0..=self.steps).map(move |i| {
            let theta = i as f32 * angle_step;
            Vec3::new(
                self.center.x + self.radius * theta.cos(),
                self.center.y + self.radius * theta.sin(),
                0.0,
            )
        })
    }
}

impl LocalBounds for CircleShape {
    fn local_bounds(&self) -> Bounds {
        let center = Vec3::new(self.center.x, self.center.y, 0.0);
        let (min, max) = self
            .rim_points()
            .fold((center, center), |(min, max), p| (min.inf(&p), max.sup(&p)));
        Bounds::new(min, max)
    }
}

/// Axis-aligned cuboid in object space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CuboidShape {
    center: Vec3,
    size: Vec3,
}

impl CuboidShape {
    /// Create a cuboid, rejecting non-positive sizes
    pub fn new(center: Vec3, size: Vec3) -> Result<Self, ShapeError> {
        if !utils::is_finite_vec3(&center) || !utils::is_finite_vec3(&size) {
            return Err(ShapeError::NonFinite("cuboid"));
        }
        if size.iter().any(|s| *s <= 0.0) {
            return Err(ShapeError::NonPositiveSize { shape: "cuboid", size });
        }
        Ok(Self { center, size })
    }
}

impl LocalBounds for CuboidShape {
    fn local_bounds(&self) -> Bounds {
        let half = self.size * 0.5;
        Bounds::new(self.center - half, self.center + half)
    }
}

/// UV sphere sampled on a `steps` x `steps` latitude/longitude lattice
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereShape {
    center: Vec3,
    radius: f32,
    steps: u32,
}

impl SphereShape {
    /// Create a sphere
    pub fn new(center: Vec3, radius: f32, steps: u32) -> Result<Self, ShapeError> {
        if !utils::is_finite_vec3(&center) || !radius.is_finite() {
            return Err(ShapeError::NonFinite("sphere"));
        }
        check_curve("sphere", radius, steps)?;
        Ok(Self { center, radius, steps })
    }

    fn lattice_point(&self, theta: f32, phi: f32) -> Vec3 {
        Vec3::new(
            self.radius * theta.sin() * phi.cos() + self.center.x,
            self.radius * theta.sin() * phi.sin() + self.center.y,
            self.radius * theta.cos() + self.center.z,
        )
    }
}

impl LocalBounds for SphereShape {
    fn local_bounds(&self) -> Bounds {
        let theta_step = std::f32::consts::PI / self.steps as f32;
        let phi_step = 2.0 * std::f32::consts::PI / self.steps as f32;

        let lattice = (0..=self.steps).flat_map(|i| {
            (0..=self.steps).map(move |j| (i as f32 * theta_step, j as f32 * phi_step))
        });

        let first = self.lattice_point(0.0, 0.0);
        let (min, max) = lattice
            .map(|(theta, phi)| self.lattice_point(theta, phi))
            .fold((first, first), |(min, max), p| (min.inf(&p), max.sup(&p)));
        Bounds::new(min, max)
    }
}

/// Any of the supported shapes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeKind {
    /// Flat triangle
    Triangle(TriangleShape),
    /// Flat rectangle
    Quad(QuadShape),
    /// Flat disc
    Circle(CircleShape),
    /// Box
    Cuboid(CuboidShape),
    /// Sphere
    Sphere(SphereShape),
}

impl ShapeKind {
    /// Short lowercase name, used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Triangle(_) => "triangle",
            Self::Quad(_) => "quad",
            Self::Circle(_) => "circle",
            Self::Cuboid(_) => "cuboid",
            Self::Sphere(_) => "sphere",
        }
    }
}

impl LocalBounds for ShapeKind {
    fn local_bounds(&self) -> Bounds {
        match self {
            Self::Triangle(s) => s.local_bounds(),
            Self::Quad(s) => s.local_bounds(),
            Self::Circle(s) => s.local_bounds(),
            Self::Cuboid(s) => s.local_bounds(),
            Self::Sphere(s) => s.local_bounds(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_points_sweep() {
        let bounds = Bounds::from_points([
            Vec3::new(1.0, -2.0, 0.5),
            Vec3::new(-1.0, 3.0, 0.0),
            Vec3::new(0.0, 0.0, 2.0),
        ])
        .unwrap();

        assert_eq!(bounds.min, Vec3::new(-1.0, -2.0, 0.0));
        assert_eq!(bounds.max, Vec3::new(1.0, 3.0, 2.0));
        assert_eq!(Bounds::from_points(Vec::new()), Err(ShapeError::EmptyPointCloud));
    }

    #[test]
    fn test_triangle_rejects_collinear() {
        let result = TriangleShape::new(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(2.0, 2.0),
        );
        assert_eq!(result, Err(ShapeError::CollinearTriangle));
    }

    #[test]
    fn test_triangle_is_flat() {
        let tri = TriangleShape::new(
            Vec2::new(-1.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 2.0),
        )
        .unwrap();
        let bounds = tri.local_bounds();

        assert_eq!(bounds.min, Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(bounds.max, Vec3::new(1.0, 2.0, 0.0));
        assert_eq!(bounds.extent().z, 0.0);
    }

    #[test]
    fn test_quad_and_cuboid_sizes() {
        assert!(QuadShape::new(Vec2::zeros(), Vec2::new(1.0, 0.0)).is_err());
        assert!(CuboidShape::new(Vec3::zeros(), Vec3::new(1.0, -1.0, 1.0)).is_err());

        let cuboid = CuboidShape::new(Vec3::new(1.0, 1.0, 1.0), Vec3::new(1.0, 2.0, 1.0)).unwrap();
        let bounds = cuboid.local_bounds();
        assert_eq!(bounds.min, Vec3::new(0.5, 0.0, 0.5));
        assert_eq!(bounds.max, Vec3::new(1.5, 2.0, 1.5));
    }

    #[test]
    fn test_curve_validation() {
        assert!(matches!(
            CircleShape::new(Vec2::zeros(), -1.0, 8),
            Err(ShapeError::NegativeRadius { .. })
        ));
        assert!(matches!(
            SphereShape::new(Vec3::zeros(), 1.0, 3),
            Err(ShapeError::TooFewSteps { steps: 3, .. })
        ));
        assert!(matches!(
            SphereShape::new(Vec3::new(f32::NAN, 0.0, 0.0), 1.0, 8),
            Err(ShapeError::NonFinite("sphere"))
        ));
    }

    #[test]
    fn test_circle_bounds_follow_samples() {
        let circle = CircleShape::new(Vec2::new(0.0, 5.0), 5.0, 100).unwrap();
        let bounds = circle.local_bounds();

        assert_relative_eq!(bounds.min.x, -5.0, epsilon = 1e-3);
        assert_relative_eq!(bounds.max.x, 5.0, epsilon = 1e-3);
        assert_relative_eq!(bounds.min.y, 0.0, epsilon = 1e-2);
        assert_relative_eq!(bounds.max.y, 10.0, epsilon = 1e-2);
        assert_eq!(bounds.extent().z, 0.0);
    }

    #[test]
    fn test_sphere_bounds() {
        let sphere = SphereShape::new(Vec3::new(1.0, 0.0, 0.0), 2.0, 16).unwrap();
        let bounds = sphere.local_bounds();

        assert_relative_eq!(bounds.min, Vec3::new(-1.0, -2.0, -2.0), epsilon = 1e-4);
        assert_relative_eq!(bounds.max, Vec3::new(3.0, 2.0, 2.0), epsilon = 1e-4);
    }
}
