use bolero::check;
use glide_core::{Axis, MaxAccel, acceleration_for, rest_position};

/// Inputs are generated as integers and scaled, keeping them finite and in a
/// range where a run completes in a few thousand ticks.
fn position(raw: i16) -> f64 {
    raw as f64 / 100.0
}

fn speed(raw: i8) -> f64 {
    raw as f64 / 10.0
}

fn max_accel(raw: u8) -> f64 {
    (raw as f64 + 1.0) / 256.0
}

const TICK_BUDGET: u64 = 100_000;

#[test]
fn output_is_bounded() {
    check!()
        .with_type::<(i16, i16, i8, u8)>()
        .for_each(|(p0, p1, v0, a)| {
            let a = max_accel(*a);
            let accel = acceleration_for(position(*p0), position(*p1), speed(*v0), a);
            assert!(accel.abs() <= a, "{accel} exceeds {a}");
        });
}

#[test]
fn reflection_symmetry() {
    check!()
        .with_type::<(i16, i16, i8, u8)>()
        .for_each(|(p0, p1, v0, a)| {
            let (p0, p1, v0, a) = (position(*p0), position(*p1), speed(*v0), max_accel(*a));
            assert_eq!(
                acceleration_for(p0, p1, v0, a),
                -acceleration_for(-p0, -p1, -v0, a)
            );
        });
}

#[test]
fn rest_at_zero_speed() {
    check!().with_type::<(i16, u8)>().for_each(|(p, a)| {
        let p = position(*p);
        assert_eq!(rest_position(p, 0.0, max_accel(*a)), p);
    });
}

#[test]
fn fast_path_lands_on_target() {
    check!().with_type::<(i16, i8, i8, u8)>().for_each(|(p0, gap, v0, a)| {
        let a = max_accel(*a);
        // Gap and speed both within one acceleration unit.
        let gap = *gap as f64 / 128.0 * a;
        let v0 = *v0 as f64 / 128.0 * a;
        let p0 = position(*p0);
        let p1 = p0 + gap;
        let gap = p1 - p0;
        if gap.abs() > a || (gap - v0).abs() > a {
            return;
        }
        let accel = acceleration_for(p0, p1, v0, a);
        let landed = p0 + (v0 + accel);
        assert!((landed - p1).abs() <= 1e-9, "landed at {landed}, target {p1}");
    });
}

#[test]
fn converges_from_any_state() {
    check!()
        .with_type::<(i16, i16, i8, u8)>()
        .for_each(|(p0, p1, v0, a)| {
            let target = position(*p1);
            let max_accel = MaxAccel::new(max_accel(*a)).unwrap();
            let mut axis = Axis::new(position(*p0), speed(*v0));

            let mut held = 0;
            for _ in 0..TICK_BUDGET {
                axis.step(target, max_accel);
                if axis.is_settled_at(target, 1e-9) {
                    held += 1;
                    if held == 10 {
                        return;
                    }
                } else {
                    held = 0;
                }
            }
            panic!("did not settle on {target}: {axis:?}");
        });
}

#[test]
fn no_overshoot_from_rest() {
    check!().with_type::<(i16, i16, u8)>().for_each(|(p0, p1, a)| {
        let target = position(*p1);
        let start = position(*p0);
        let direction = (target - start).signum();
        let max_accel = MaxAccel::new(max_accel(*a)).unwrap();
        let mut axis = Axis::at_rest(start);

        for _ in 0..TICK_BUDGET {
            axis.step(target, max_accel);
            assert!(
                (axis.position - target) * direction <= 1e-9,
                "passed {target} at {}",
                axis.position
            );
            if axis.is_settled_at(target, 1e-9) {
                return;
            }
        }
        panic!("did not reach {target}: {axis:?}");
    });
}
