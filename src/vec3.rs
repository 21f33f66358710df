//! Vec3
//!
//! Mutable (x, y, z) triple used both as a position/direction argument
//! and as a parsed return value.

use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::McError;

/// A 3-component position or direction
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn length_sqr(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    pub fn length(&self) -> f64 {
        self.length_sqr().sqrt()
    }

    /// Unit vector in the same direction.
    /// The zero vector yields NaN components.
    pub fn unit(&self) -> Self {
        *self / self.length()
    }

    /// Truncate each component toward negative infinity, in place
    pub fn ifloor(&mut self) {
        self.map(f64::floor);
    }

    /// Round each component half-up, in place
    pub fn iround(&mut self) {
        self.map(|v| (v + 0.5).floor());
    }

    /// Floored copy, e.g. the block containing a position
    pub fn floored(&self) -> Self {
        let mut v = *self;
        v.ifloor();
        v
    }

    pub fn rounded(&self) -> Self {
        let mut v = *self;
        v.iround();
        v
    }

    /// Integer block coordinates of this position
    pub fn tile(&self) -> [i64; 3] {
        [
            self.x.floor() as i64,
            self.y.floor() as i64,
            self.z.floor() as i64,
        ]
    }

    /// Quarter turn about the vertical axis
    pub fn rotate_left(&mut self) {
        let (x, z) = (self.z, -self.x);
        self.x = x;
        self.z = z;
    }

    pub fn rotate_right(&mut self) {
        let (x, z) = (-self.z, self.x);
        self.x = x;
        self.z = z;
    }

    /// Component-wise closeness, same rule as `math.isclose`:
    /// `|a - b| <= max(rel_tol * max(|a|, |b|), abs_tol)` for every axis.
    pub fn is_close(&self, rhs: &Vec3, rel_tol: f64, abs_tol: f64) -> bool {
        let close = |a: f64, b: f64| (a - b).abs() <= (rel_tol * a.abs().max(b.abs())).max(abs_tol);
        close(self.x, rhs.x) && close(self.y, rhs.y) && close(self.z, rhs.z)
    }

    /// `is_close` with `rel_tol = 1e-9` and `abs_tol = 0`
    pub fn is_close_default(&self, rhs: &Vec3) -> bool {
        self.is_close(rhs, 1e-9, 0.0)
    }

    fn map(&mut self, f: impl Fn(f64) -> f64) {
        self.x = f(self.x);
        self.y = f(self.y);
        self.z = f(self.z);
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(mut self, rhs: Vec3) -> Vec3 {
        self += rhs;
        self
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Vec3) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Vec3 {
        self + (-rhs)
    }
}

impl SubAssign for Vec3 {
    fn sub_assign(&mut self, rhs: Vec3) {
        *self += -rhs;
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;

    fn mul(mut self, k: f64) -> Vec3 {
        self *= k;
        self
    }
}

impl MulAssign<f64> for Vec3 {
    fn mul_assign(&mut self, k: f64) {
        self.map(|v| v * k);
    }
}

impl Div<f64> for Vec3 {
    type Output = Vec3;

    fn div(self, k: f64) -> Vec3 {
        self * (1.0 / k)
    }
}

impl DivAssign<f64> for Vec3 {
    fn div_assign(&mut self, k: f64) {
        *self *= 1.0 / k;
    }
}

impl Neg for Vec3 {
    type Output = Vec3;

    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Vec3::new(x, y, z)
    }
}

impl From<(f64, f64, f64)> for Vec3 {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Vec3::new(x, y, z)
    }
}

impl From<[i64; 3]> for Vec3 {
    fn from([x, y, z]: [i64; 3]) -> Self {
        Vec3::new(x as f64, y as f64, z as f64)
    }
}

/// Wire form: `x,y,z`
impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}

impl FromStr for Vec3 {
    type Err = McError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split(',').collect();
        if fields.len() != 3 {
            return Err(McError::Protocol(format!(
                "expected 3 comma-separated fields, got {}",
                fields.len()
            )));
        }

        let mut out = [0.0f64; 3];
        for (slot, field) in out.iter_mut().zip(&fields) {
            *slot = field
                .trim()
                .parse()
                .map_err(|_| McError::Protocol(format!("not a number: {:?}", field)))?;
        }
        Ok(Vec3::from(out))
    }
}
