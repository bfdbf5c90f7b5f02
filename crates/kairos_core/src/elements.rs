//! Low-precision analytic planetary theory.
//!
//! Keplerian orbital elements of date with linear secular rates, plus the
//! largest periodic perturbations of the Moon, Jupiter, Saturn and Uranus.
//! Elements and perturbation terms follow Paul Schlyter, "How to compute
//! planetary positions" (public domain tutorial). Longitudes are referred to
//! the mean equinox of date, so no separate precession step is needed.
//!
//! Day number `d` counts days of TT from 1999-Dec-31 0h (JD 2451543.5).

use kairos_frames::{cartesian_to_spherical, normalize_360, spherical_to_cartesian};

use crate::Body;

/// Epoch of the element set: 1999-Dec-31 0h TT.
const ELEMENT_EPOCH_JD: f64 = 2_451_543.5;

/// Kepler solver iteration cap. Eccentricities here never exceed 0.21,
/// where Newton's method converges in under six steps.
const KEPLER_MAX_ITER: usize = 30;

/// Osculating elements at a given day number. Angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct OrbitalElements {
    /// Longitude of the ascending node.
    pub node: f64,
    /// Inclination to the ecliptic.
    pub inclination: f64,
    /// Argument of perihelion (perigee for the Moon).
    pub perihelion: f64,
    /// Semi-major axis: AU, or Earth radii for the Moon.
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    pub mean_anomaly: f64,
}

impl OrbitalElements {
    /// Elements of `body` at day number `d`. For `Body::Sun` these are the
    /// elements of the Sun's apparent geocentric orbit.
    pub fn at(body: Body, d: f64) -> Self {
        let (node, inclination, perihelion, semi_major_axis, eccentricity, mean_anomaly) =
            match body {
                Body::Sun => (
                    0.0,
                    0.0,
                    282.9404 + 4.70935e-5 * d,
                    1.0,
                    0.016709 - 1.151e-9 * d,
                    356.0470 + 0.985_600_258_5 * d,
                ),
                Body::Moon => (
                    125.1228 - 0.052_953_808_3 * d,
                    5.1454,
                    318.0634 + 0.164_357_322_3 * d,
                    60.2666,
                    0.054900,
                    115.3654 + 13.064_992_950_9 * d,
                ),
                Body::Mercury => (
                    48.3313 + 3.24587e-5 * d,
                    7.0047 + 5.00e-8 * d,
                    29.1241 + 1.01444e-5 * d,
                    0.387098,
                    0.205635 + 5.59e-10 * d,
                    168.6562 + 4.092_334_436_8 * d,
                ),
                Body::Venus => (
                    76.6799 + 2.46590e-5 * d,
                    3.3946 + 2.75e-8 * d,
                    54.8910 + 1.38374e-5 * d,
                    0.723330,
                    0.006773 - 1.302e-9 * d,
                    48.0052 + 1.602_130_224_4 * d,
                ),
                Body::Mars => (
                    49.5574 + 2.11081e-5 * d,
                    1.8497 - 1.78e-8 * d,
                    286.5016 + 2.92961e-5 * d,
                    1.523688,
                    0.093405 + 2.516e-9 * d,
                    18.6021 + 0.524_020_776_6 * d,
                ),
                Body::Jupiter => (
                    100.4542 + 2.76854e-5 * d,
                    1.3030 - 1.557e-7 * d,
                    273.8777 + 1.64505e-5 * d,
                    5.20256,
                    0.048498 + 4.469e-9 * d,
                    19.8950 + 0.083_085_300_1 * d,
                ),
                Body::Saturn => (
                    113.6634 + 2.38980e-5 * d,
                    2.4886 - 1.081e-7 * d,
                    339.3939 + 2.97661e-5 * d,
                    9.55475,
                    0.055546 - 9.499e-9 * d,
                    316.9670 + 0.033_444_228_2 * d,
                ),
                Body::Uranus => (
                    74.0005 + 1.3978e-5 * d,
                    0.7733 + 1.9e-8 * d,
                    96.6612 + 3.0565e-5 * d,
                    19.18171 - 1.55e-8 * d,
                    0.047318 + 7.45e-9 * d,
                    142.5905 + 0.011_725_806 * d,
                ),
                Body::Neptune => (
                    131.7806 + 3.0173e-5 * d,
                    1.7700 - 2.55e-7 * d,
                    272.8461 - 6.027e-6 * d,
                    30.05826 + 3.313e-8 * d,
                    0.008606 + 2.15e-9 * d,
                    260.2471 + 0.005_995_147 * d,
                ),
            };
        Self {
            node,
            inclination,
            perihelion,
            semi_major_axis,
            eccentricity,
            mean_anomaly: normalize_360(mean_anomaly),
        }
    }

    /// Solve Kepler's equation `E − e·sin E = M`, returning E in radians.
    fn eccentric_anomaly_rad(&self) -> f64 {
        let m = self.mean_anomaly.to_radians();
        let e = self.eccentricity;
        let mut ea = m + e * m.sin() * (1.0 + e * m.cos());
        for _ in 0..KEPLER_MAX_ITER {
            let delta = (ea - e * ea.sin() - m) / (1.0 - e * ea.cos());
            ea -= delta;
            if delta.abs() < 1e-12 {
                break;
            }
        }
        ea
    }

    /// True anomaly (degrees) and radius vector.
    pub fn true_anomaly_and_radius(&self) -> (f64, f64) {
        let ea = self.eccentric_anomaly_rad();
        let e = self.eccentricity;
        let a = self.semi_major_axis;
        let xv = a * (ea.cos() - e);
        let yv = a * (1.0 - e * e).sqrt() * ea.sin();
        (yv.atan2(xv).to_degrees(), (xv * xv + yv * yv).sqrt())
    }

    /// Rectangular ecliptic coordinates of the body around its primary.
    pub fn ecliptic_rectangular(&self) -> [f64; 3] {
        let (v, r) = self.true_anomaly_and_radius();
        let n = self.node.to_radians();
        let i = self.inclination.to_radians();
        let u = (v + self.perihelion).to_radians();
        [
            r * (n.cos() * u.cos() - n.sin() * u.sin() * i.cos()),
            r * (n.sin() * u.cos() + n.cos() * u.sin() * i.cos()),
            r * u.sin() * i.sin(),
        ]
    }
}

/// Geocentric rectangular position of the Sun in AU, on the ecliptic.
fn sun_rectangular(d: f64) -> [f64; 3] {
    let sun = OrbitalElements::at(Body::Sun, d);
    let (v, r) = sun.true_anomaly_and_radius();
    let lon = (v + sun.perihelion).to_radians();
    [r * lon.cos(), r * lon.sin(), 0.0]
}

/// Periodic terms in the Moon's longitude, degrees.
fn moon_longitude_perturbation(d: f64) -> f64 {
    let sun = OrbitalElements::at(Body::Sun, d);
    let moon = OrbitalElements::at(Body::Moon, d);

    let ms = sun.mean_anomaly;
    let mm = moon.mean_anomaly;
    let ls = ms + sun.perihelion;
    let lm = mm + moon.perihelion + moon.node;
    let dd = lm - ls;
    let f = lm - moon.node;

    let s = |deg: f64| deg.to_radians().sin();
    -1.274 * s(mm - 2.0 * dd) // evection
        + 0.658 * s(2.0 * dd) // variation
        - 0.186 * s(ms) // yearly equation
        - 0.059 * s(2.0 * mm - 2.0 * dd)
        - 0.057 * s(mm - 2.0 * dd + ms)
        + 0.053 * s(mm + 2.0 * dd)
        + 0.046 * s(2.0 * dd - ms)
        + 0.041 * s(mm - ms)
        - 0.035 * s(dd) // parallactic equation
        - 0.031 * s(mm + ms)
        - 0.015 * s(2.0 * f - 2.0 * dd)
        + 0.011 * s(mm - 4.0 * dd)
}

/// Mutual perturbations of the giant planets in heliocentric longitude, degrees.
fn giant_longitude_perturbation(body: Body, d: f64) -> f64 {
    let mj = OrbitalElements::at(Body::Jupiter, d).mean_anomaly;
    let ms = OrbitalElements::at(Body::Saturn, d).mean_anomaly;
    let mu = OrbitalElements::at(Body::Uranus, d).mean_anomaly;

    let s = |deg: f64| deg.to_radians().sin();
    let c = |deg: f64| deg.to_radians().cos();
    match body {
        Body::Jupiter => {
            -0.332 * s(2.0 * mj - 5.0 * ms - 67.6) - 0.056 * s(2.0 * mj - 2.0 * ms + 21.0)
                + 0.042 * s(3.0 * mj - 5.0 * ms + 21.0)
                - 0.036 * s(mj - 2.0 * ms)
                + 0.022 * c(mj - ms)
                + 0.023 * s(2.0 * mj - 3.0 * ms + 52.0)
                - 0.016 * s(mj - 5.0 * ms - 69.0)
        }
        Body::Saturn => {
            0.812 * s(2.0 * mj - 5.0 * ms - 67.6) - 0.229 * c(2.0 * mj - 4.0 * ms - 2.0)
                + 0.119 * s(mj - 2.0 * ms - 3.0)
                + 0.046 * s(2.0 * mj - 6.0 * ms - 69.0)
                + 0.014 * s(mj - 3.0 * ms + 32.0)
        }
        Body::Uranus => {
            0.040 * s(ms - 2.0 * mu + 6.0) + 0.035 * s(ms - 3.0 * mu + 33.0)
                - 0.015 * s(mj - mu + 20.0)
        }
        _ => 0.0,
    }
}

/// Geocentric tropical ecliptic longitude of `body` in degrees, [0, 360).
pub(crate) fn geocentric_longitude_deg(body: Body, jd_tt: f64) -> f64 {
    let d = jd_tt - ELEMENT_EPOCH_JD;
    match body {
        Body::Sun => {
            let sun = OrbitalElements::at(Body::Sun, d);
            let (v, _) = sun.true_anomaly_and_radius();
            normalize_360(v + sun.perihelion)
        }
        Body::Moon => {
            let xyz = OrbitalElements::at(Body::Moon, d).ecliptic_rectangular();
            let lon = cartesian_to_spherical(&xyz).lon_deg;
            normalize_360(lon + moon_longitude_perturbation(d))
        }
        planet => {
            let mut helio = OrbitalElements::at(planet, d).ecliptic_rectangular();
            let dlon = giant_longitude_perturbation(planet, d);
            if dlon != 0.0 {
                let mut sph = cartesian_to_spherical(&helio);
                sph.lon_deg += dlon;
                helio = spherical_to_cartesian(&sph);
            }
            let sun = sun_rectangular(d);
            let geo = [helio[0] + sun[0], helio[1] + sun[1], helio[2] + sun[2]];
            cartesian_to_spherical(&geo).lon_deg
        }
    }
}
