//! Script facing wrappers around [`MersenneTwister`].
//!
//! Scripts hold a generator by reference and may call into it before it has
//! been seeded. These functions never panic on that: they log, and return an
//! error that callers can turn into a default value with
//! `unwrap_or_default()`.
use anyhow::Result;
use anyhow::bail;
use bevy_math::DVec2;
use bevy_math::DVec3;

use super::DBox;
use super::MersenneTwister;

fn ensure_initialized(twister: &MersenneTwister) -> Result<()> {
    if twister.is_initialized() {
        return Ok(());
    }
    tracing::warn!("random function called on an uninitialized mersenne twister");
    bail!("mersenne twister is not initialized")
}

pub fn initial_seed(twister: &MersenneTwister) -> Result<i64> {
    ensure_initialized(twister)?;
    Ok(twister.initial_seed())
}

/// Engine words and the cursor into them.
pub fn state(twister: &MersenneTwister) -> Result<(Vec<u64>, usize)> {
    ensure_initialized(twister)?;
    Ok((twister.state().to_vec(), twister.state_index()))
}

pub fn random_bool(twister: &mut MersenneTwister) -> Result<bool> {
    ensure_initialized(twister)?;
    Ok(twister.random_bool())
}

/// Uniform in [min, max].
pub fn random_range_i32(twister: &mut MersenneTwister, min: i32, max: i32) -> Result<i32> {
    ensure_initialized(twister)?;
    if min > max {
        bail!("random range min {min} is greater than max {max}");
    }
    Ok(twister.random_range(min, max))
}

/// Uniform in [min, max].
pub fn random_range_i64(twister: &mut MersenneTwister, min: i64, max: i64) -> Result<i64> {
    ensure_initialized(twister)?;
    if min > max {
        bail!("random range min {min} is greater than max {max}");
    }
    Ok(twister.random_range(min, max))
}

/// Uniform in [min, max).
pub fn random_range_f64(twister: &mut MersenneTwister, min: f64, max: f64) -> Result<f64> {
    ensure_initialized(twister)?;
    if !(min < max) || !(max - min).is_finite() {
        bail!("random range [{min}, {max}) is empty or unbounded");
    }
    Ok(twister.random_range_float(min, max))
}

pub fn random_fraction(twister: &mut MersenneTwister) -> Result<f64> {
    ensure_initialized(twister)?;
    Ok(twister.fraction())
}

pub fn random_unit_vector(twister: &mut MersenneTwister) -> Result<DVec3> {
    ensure_initialized(twister)?;
    Ok(twister.unit_vector())
}

pub fn random_point_in_unit_circle(twister: &mut MersenneTwister) -> Result<DVec2> {
    ensure_initialized(twister)?;
    Ok(twister.point_in_unit_circle())
}

pub fn random_point_in_unit_sphere(twister: &mut MersenneTwister) -> Result<DVec3> {
    ensure_initialized(twister)?;
    Ok(twister.point_in_unit_sphere())
}

/// Bounds must be finite and every non-flat axis must have a finite span.
fn ensure_samplable(bounds: &DBox) -> Result<()> {
    if !bounds.min.is_finite() || !bounds.max.is_finite() {
        bail!("box bounds {} .. {} are not finite", bounds.min, bounds.max);
    }
    for axis in 0..3 {
        let (min, max) = (bounds.min[axis], bounds.max[axis]);
        if max > min && !(max - min).is_finite() {
            bail!("box axis {axis} span [{min}, {max}) is unbounded");
        }
    }
    Ok(())
}

pub fn random_point_in_bounding_box(twister: &mut MersenneTwister, center: DVec3, half_size: DVec3) -> Result<DVec3> {
    ensure_initialized(twister)?;
    ensure_samplable(&DBox::from_center_half_size(center, half_size))?;
    Ok(twister.point_in_bounding_box(center, half_size))
}

pub fn random_point_in_box(twister: &mut MersenneTwister, bounds: &DBox) -> Result<DVec3> {
    ensure_initialized(twister)?;
    ensure_samplable(bounds)?;
    Ok(twister.point_in_box(bounds))
}

/// Cone sampling with the half angle in degrees.
pub fn random_cone(twister: &mut MersenneTwister, direction: DVec3, half_angle_degrees: f64) -> Result<DVec3> {
    ensure_initialized(twister)?;
    Ok(twister.cone(direction, half_angle_degrees.to_radians()))
}

/// Elliptical cone sampling with both half angles in degrees.
pub fn random_cone_with_vertical(
    twister: &mut MersenneTwister,
    direction: DVec3,
    half_angle_degrees: f64,
    vertical_half_angle_degrees: f64,
) -> Result<DVec3> {
    ensure_initialized(twister)?;
    Ok(twister.elliptical_cone(
        direction,
        half_angle_degrees.to_radians(),
        vertical_half_angle_degrees.to_radians(),
    ))
}

pub fn random_from_fraction_i32(twister: &mut MersenneTwister, numerator: i32, denominator: i32) -> Result<bool> {
    ensure_initialized(twister)?;
    if denominator <= 0 {
        bail!("denominator {denominator} is not positive");
    }
    Ok(twister.random_from_fraction(numerator, denominator))
}

pub fn random_from_fraction_i64(twister: &mut MersenneTwister, numerator: i64, denominator: i64) -> Result<bool> {
    ensure_initialized(twister)?;
    if denominator <= 0 {
        bail!("denominator {denominator} is not positive");
    }
    Ok(twister.random_from_fraction(numerator, denominator))
}

/// A random element and its index. An empty slice gives the default element
/// and no index.
pub fn random_element_in_slice<T: Clone + Default>(
    twister: &mut MersenneTwister,
    items: &[T],
) -> Result<(T, Option<usize>)> {
    ensure_initialized(twister)?;
    Ok(match twister.random_element(items) {
        Some((index, item)) => (item.clone(), Some(index)),
        None => (T::default(), None),
    })
}

/// Shuffle the whole slice. Slices shorter than two are left alone.
pub fn shuffle_slice<T>(twister: &mut MersenneTwister, items: &mut [T]) -> Result<()> {
    ensure_initialized(twister)?;
    if items.len() < 2 {
        return Ok(());
    }
    twister.shuffle(items)
}
