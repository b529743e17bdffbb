// om-core/src/units.rs

use uom::si::f64::{Energy as UomEnergy, Power as UomPower, Time as UomTime};

// Public canonical unit types (SI, f64)
pub type Energy = UomEnergy;
pub type Power = UomPower;
pub type Time = UomTime;

/// Hours in a (non-leap) operating year.
pub const HOURS_PER_YEAR: f64 = 8760.0;

#[inline]
pub fn kw(v: f64) -> Power {
    use uom::si::power::kilowatt;
    Power::new::<kilowatt>(v)
}

#[inline]
pub fn hours(v: f64) -> Time {
    use uom::si::time::hour;
    Time::new::<hour>(v)
}

#[inline]
pub fn as_kw(p: Power) -> f64 {
    use uom::si::power::kilowatt;
    p.get::<kilowatt>()
}

#[inline]
pub fn as_kwh(e: Energy) -> f64 {
    use uom::si::energy::kilowatt_hour;
    e.get::<kilowatt_hour>()
}

/// Energy delivered in one year by `capacity` running at `capacity_factor`.
pub fn annual_energy(capacity: Power, capacity_factor: f64) -> Energy {
    let energy: Energy = capacity * hours(HOURS_PER_YEAR);
    energy * capacity_factor
}
