use super::*;

/// Angular separation in degrees.
fn separation(a: Equatorial, b: Equatorial) -> f64 {
    let (ra1, dec1) = ((a.ra_hours * 15.0).to_radians(), a.dec_degrees.to_radians());
    let (ra2, dec2) = ((b.ra_hours * 15.0).to_radians(), b.dec_degrees.to_radians());
    let cos = dec1.sin() * dec2.sin() + dec1.cos() * dec2.cos() * (ra1 - ra2).cos();
    cos.clamp(-1.0, 1.0).acos().to_degrees()
}

/// Hour difference folded into `[-12, 12)`.
fn hours_apart(a: f64, b: f64) -> f64 {
    (a - b + 12.0).rem_euclid(24.0) - 12.0
}

struct DataSet {
    body: Body,
    ra: f64,
    dec: f64,
}

// 2020-12-21T18:00:00Z, the Jupiter/Saturn great conjunction. Positions agree
// with published ephemerides to a few arcminutes.
const SOLSTICE_2020: i64 = 1_608_573_600;

const DATA: [DataSet; 7] = [
    DataSet {
        body: Body::Sun,
        ra: 18.025,
        dec: -23.437,
    },
    DataSet {
        body: Body::Venus,
        ra: 16.400,
        dec: -20.53,
    },
    DataSet {
        body: Body::Mars,
        ra: 1.417,
        dec: 9.62,
    },
    DataSet {
        body: Body::Jupiter,
        ra: 20.187,
        dec: -20.51,
    },
    DataSet {
        body: Body::Saturn,
        ra: 20.185,
        dec: -20.42,
    },
    DataSet {
        body: Body::Uranus,
        ra: 2.320,
        dec: 13.41,
    },
    DataSet {
        body: Body::Neptune,
        ra: 23.313,
        dec: -5.61,
    },
];

#[test]
fn test_planets() {
    for DataSet { body, ra, dec } in &DATA {
        let pos = body.position(SOLSTICE_2020);
        let off = separation(pos, Equatorial::new(*ra, *dec));
        assert!(off < 0.1, "{}: {pos:?} is {off} degrees off", body.name());
    }
}

#[test]
fn great_conjunction() {
    let jupiter = Body::Jupiter.position(SOLSTICE_2020);
    let saturn = Body::Saturn.position(SOLSTICE_2020);
    assert!(separation(jupiter, saturn) < 0.2);
}

#[test]
fn sun_at_equinox_and_solstice() {
    // 2020-03-20T03:50Z
    let sun = Body::Sun.position(1_584_676_200);
    assert_approx_eq!(hours_apart(sun.ra_hours, 0.0), 0.0, 0.01);
    assert_approx_eq!(sun.dec_degrees, 0.0, 0.02);

    // 2021-06-21T03:32Z
    let sun = Body::Sun.position(1_624_246_320);
    assert_approx_eq!(sun.ra_hours, 6.0, 0.01);
    assert_approx_eq!(sun.dec_degrees, 23.436, 0.02);
}

#[test]
fn moon_opposes_sun_at_lunar_eclipse() {
    // 2022-11-08T11:00Z, mid totality
    let t = 1_667_905_200;
    let sun = Body::Sun.position(t);
    let moon = Body::Moon.position(t);
    assert_approx_eq!(hours_apart(moon.ra_hours, sun.ra_hours).abs(), 12.0, 0.1);
    assert_approx_eq!(moon.dec_degrees, -sun.dec_degrees, 0.5);
}

#[test]
fn moon_covers_sun_at_solar_eclipse() {
    // 2024-04-08T18:18Z; geocentric, so up to a degree of parallax remains
    let t = 1_712_600_280;
    let sun = Body::Sun.position(t);
    let moon = Body::Moon.position(t);
    assert!(separation(sun, moon) < 0.6);
}

#[test]
fn mars_opposes_sun_at_opposition() {
    // 2020-10-13T23:00Z
    let t = 1_602_630_000;
    let sun = Body::Sun.position(t);
    let mars = Body::Mars.position(t);
    assert_approx_eq!(hours_apart(mars.ra_hours, sun.ra_hours).abs(), 12.0, 0.1);
}

#[test]
fn positions_stay_in_range() {
    // 1980-01-01 onwards, every ~14 days for about a century
    let start = 315_532_800;
    for n in 0..3000i64 {
        let t = start + n * 1_234_567;
        for body in Body::ALL {
            let Equatorial {
                ra_hours,
                dec_degrees,
            } = body.position(t);
            assert!((0.0..24.0).contains(&ra_hours), "{body:?} at {t}: ra {ra_hours}");
            assert!((-90.0..=90.0).contains(&dec_degrees), "{body:?} at {t}: dec {dec_degrees}");
        }
    }
}

#[test]
fn inner_planets_stay_near_the_sun() {
    // maximum elongations: Mercury 28, Venus 47 degrees
    let start = 1_577_836_800;
    for n in 0..400i64 {
        let t = start + n * 86_400 * 3;
        let sun = Body::Sun.position(t);
        assert!(separation(sun, Body::Mercury.position(t)) < 28.5);
        assert!(separation(sun, Body::Venus.position(t)) < 47.5);
    }
}

#[test]
fn body_indices_round_trip() {
    for (index, body) in Body::ALL.iter().enumerate() {
        assert_eq!(body.index(), index);
        assert_eq!(Body::from_index(index), Some(*body));
    }
    assert_eq!(Body::from_index(9), None);
    assert!(Body::Sun.elements().is_none());
    assert!(Body::Moon.is_geocentric());
}
