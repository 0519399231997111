//! Angle table generation
//!
//! Precomputes the micro-rotation angles γ_i = arctan(2^-i) as fixed-point
//! codes at the data-path width, together with the half-plane seed constant
//! and the accumulated rotation gain. A table is a pure function of its
//! configuration, so equal configurations always yield bit-identical
//! tables; a process-wide cache hands out shared copies.

use std::collections::HashMap;
use std::f64::consts::PI;
use std::sync::{Arc, Mutex};

use log::{debug, trace};

use crate::codec;
use crate::config::CordicConfig;
use crate::error::CordicError;

// Process-wide table cache - tables are immutable once built, shared by Arc
lazy_static::lazy_static! {
    static ref TABLE_CACHE: Mutex<HashMap<CordicConfig, Arc<AngleTable>>> =
        Mutex::new(HashMap::new());
}

/// Precomputed rotation angles and constants for one configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AngleTable {
    config: CordicConfig,

    /// γ_i = arctan(2^-i) in the configured phase domain, data-path width
    entries: Vec<i64>,

    /// Half-plane pre-rotation constant (π in the configured phase domain).
    /// Encoded at the data-path scale but held at the extended width; in
    /// radians mode it is the one constant wider than the data path.
    pi_seed: i64,

    /// Accumulated magnitude gain A = Π 1/sqrt(1 + 2^-2i)
    gain: f64,

    /// Integer realization of `gain` as a multiplier over 2^(bits-1)
    gain_fix: i64,
}

impl AngleTable {
    /// Build the table for `config`.
    ///
    /// Fails if any encoded quantity leaves its width or if truncation
    /// breaks the decreasing-angle shape (angles must strictly decrease
    /// until they reach zero and stay zero afterwards).
    pub fn build(config: CordicConfig) -> Result<Self, CordicError> {
        let bits = config.bits();
        let divisor = config.norm().divisor();

        let mut entries = Vec::with_capacity(config.iterations());
        for i in 0..config.iterations() {
            let angle = 2.0_f64.powi(-(i as i32)).atan() / divisor;
            entries.push(codec::to_fixed(angle, bits)?);
        }
        validate_entries(&entries)?;

        let pi_seed = codec::encode_trunc(PI / divisor, bits);
        codec::check_range(pi_seed, config.extended_bits())?;

        let gain = rotation_gain(config.iterations());
        let gain_fix = (gain * (1i64 << (bits - 1)) as f64).round() as i64;

        debug!(
            "built angle table: {} bits, {} iterations, {:?}, pi_seed={}, gain_fix={}",
            bits,
            config.iterations(),
            config.norm(),
            pi_seed,
            gain_fix
        );

        Ok(Self {
            config,
            entries,
            pi_seed,
            gain,
            gain_fix,
        })
    }

    /// Fetch the shared table for `config`, building it on first use.
    ///
    /// Repeated calls return clones of the same Arc; concurrent first
    /// calls serialize on the cache lock so every caller observes the
    /// same bits.
    pub fn cached(config: CordicConfig) -> Result<Arc<Self>, CordicError> {
        if let Ok(mut cache) = TABLE_CACHE.lock() {
            if let Some(table) = cache.get(&config) {
                trace!("angle table cache hit: {:?}", config);
                return Ok(Arc::clone(table));
            }
            let table = Arc::new(Self::build(config)?);
            cache.insert(config, Arc::clone(&table));
            return Ok(table);
        }
        // Poisoned cache: serve an uncached build rather than failing
        Ok(Arc::new(Self::build(config)?))
    }

    /// Configuration this table was built for.
    #[inline]
    pub fn config(&self) -> CordicConfig {
        self.config
    }

    /// Rotation angle codes, one per iteration.
    #[inline]
    pub fn entries(&self) -> &[i64] {
        &self.entries
    }

    /// Half-plane seed constant.
    #[inline]
    pub fn pi_seed(&self) -> i64 {
        self.pi_seed
    }

    /// Accumulated rotation gain as a real value.
    #[inline]
    pub fn gain(&self) -> f64 {
        self.gain
    }

    /// Integer gain multiplier over 2^(bits-1).
    #[inline]
    pub fn gain_fix(&self) -> i64 {
        self.gain_fix
    }
}

/// Angles must strictly decrease until truncation reaches zero; after the
/// first zero every entry is zero (those iterations still steer the vector
/// but no longer move the phase accumulator).
fn validate_entries(entries: &[i64]) -> Result<(), CordicError> {
    let mut in_zero_tail = false;
    for i in 1..entries.len() {
        if entries[i - 1] == 0 {
            in_zero_tail = true;
        }
        if in_zero_tail {
            if entries[i] != 0 {
                return Err(CordicError::config(format!(
                    "angle table entry {} is {} but the table already reached zero",
                    i, entries[i]
                )));
            }
        } else if entries[i] != 0 && entries[i] >= entries[i - 1] {
            return Err(CordicError::config(format!(
                "angle table entry {} ({}) does not decrease from entry {} ({})",
                i,
                entries[i],
                i - 1,
                entries[i - 1]
            )));
        }
    }
    Ok(())
}

/// A(n) = Π 1/sqrt(1 + 2^-2i) over the first `iterations` micro-rotations.
fn rotation_gain(iterations: usize) -> f64 {
    let mut gain = 1.0;
    for i in 0..iterations {
        gain /= (1.0 + 2.0_f64.powi(-2 * i as i32)).sqrt();
    }
    gain
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PhaseNorm;

    fn table(bits: u32, iterations: usize, norm: PhaseNorm) -> AngleTable {
        AngleTable::build(CordicConfig::new(bits, iterations, norm).unwrap()).unwrap()
    }

    #[test]
    fn test_table_24_pi_golden() {
        let t = table(24, 24, PhaseNorm::Pi);
        assert_eq!(t.entries().len(), 24);
        assert_eq!(
            &t.entries()[..6],
            &[2_097_151, 1_238_020, 654_136, 332_049, 166_669, 83_415]
        );
        // Tail truncates to zero where the angle drops below one step
        assert_eq!(&t.entries()[18..], &[10, 5, 2, 1, 0, 0]);
        assert_eq!(t.pi_seed(), 8_388_607);
        assert_eq!(t.gain_fix(), 5_094_007);
    }

    #[test]
    fn test_table_24_radians_golden() {
        let t = table(24, 24, PhaseNorm::Radians);
        assert_eq!(
            &t.entries()[..6],
            &[6_588_396, 3_889_357, 2_055_029, 1_043_165, 523_606, 262_058]
        );
        assert_eq!(t.pi_seed(), 26_353_586);
        assert_eq!(t.gain_fix(), 5_094_007);
    }

    #[test]
    fn test_table_small_width_goldens() {
        let t = table(16, 16, PhaseNorm::Pi);
        assert_eq!(t.entries()[0], 8_191);
        assert_eq!(t.entries()[1], 4_835);
        assert_eq!(t.pi_seed(), 32_767);
        assert_eq!(t.gain_fix(), 19_898);

        let t = table(12, 14, PhaseNorm::Pi);
        assert_eq!(t.entries()[0], 511);
        assert_eq!(t.entries()[1], 302);
        assert_eq!(t.pi_seed(), 2_047);
        assert_eq!(t.gain_fix(), 1_244);

        let t = table(8, 8, PhaseNorm::Radians);
        assert_eq!(t.entries()[0], 99);
        assert_eq!(t.entries()[1], 58);
        assert_eq!(t.pi_seed(), 398);
        assert_eq!(t.gain_fix(), 78);
    }

    #[test]
    fn test_gain_approaches_known_limit() {
        let t = table(24, 24, PhaseNorm::Pi);
        assert!(
            (t.gain() - 0.607_252_935_008_882_8).abs() < 1e-15,
            "Gain at 24 iterations should be ~0.6072529, got {}",
            t.gain()
        );
    }

    #[test]
    fn test_gain_never_increases_with_iterations() {
        // The factor 1/sqrt(1 + 2^-2i) resolves in f64 only up to i = 25;
        // from i = 26 it rounds to exactly 1.0 and the product saturates
        let mut prev = rotation_gain(1);
        for n in 2..=48 {
            let g = rotation_gain(n);
            assert!(
                g <= prev,
                "Gain must never grow with extra rotations: A({}) = {} > A({}) = {}",
                n,
                g,
                n - 1,
                prev
            );
            if n <= 26 {
                assert!(
                    g < prev,
                    "Gain should shrink while the factor resolves: A({}) = {} >= A({}) = {}",
                    n,
                    g,
                    n - 1,
                    prev
                );
            }
            prev = g;
        }
        // First saturated step, pinned
        assert_eq!(rotation_gain(27), rotation_gain(26));
    }

    #[test]
    fn test_entries_decrease_then_stay_zero_across_configs() {
        for &bits in &[5, 8, 12, 16, 20, 24, 28, 30] {
            for &iterations in &[4usize, 8, 16, 24, 32, 48] {
                for norm in [PhaseNorm::Pi, PhaseNorm::Radians] {
                    let t = table(bits, iterations, norm);
                    let e = t.entries();
                    let mut zero_seen = false;
                    for i in 1..e.len() {
                        if e[i - 1] == 0 {
                            zero_seen = true;
                        }
                        if zero_seen {
                            assert_eq!(
                                e[i], 0,
                                "{} bits {} iterations {:?}: entry {} nonzero after zero",
                                bits, iterations, norm, i
                            );
                        } else {
                            assert!(
                                e[i] == 0 || e[i] < e[i - 1],
                                "{} bits {} iterations {:?}: entry {} = {} not below {}",
                                bits,
                                iterations,
                                norm,
                                i,
                                e[i],
                                e[i - 1]
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_validation_rejects_bad_shapes() {
        assert!(validate_entries(&[5, 3, 1, 0, 0]).is_ok());
        assert!(validate_entries(&[1]).is_ok());
        assert!(validate_entries(&[0, 0]).is_ok());
        // Repeated nonzero entry
        assert!(validate_entries(&[5, 5, 1]).is_err());
        // Increasing entry
        assert!(validate_entries(&[3, 5, 1]).is_err());
        // Nonzero after the zero tail began
        assert!(validate_entries(&[5, 3, 0, 1]).is_err());
    }

    #[test]
    fn test_build_is_deterministic() {
        let config = CordicConfig::new(24, 24, PhaseNorm::Pi).unwrap();
        let a = AngleTable::build(config).unwrap();
        let b = AngleTable::build(config).unwrap();
        assert_eq!(a, b, "Same config must always build the same table");
    }

    #[test]
    fn test_cached_returns_shared_table() {
        let config = CordicConfig::new(18, 18, PhaseNorm::Pi).unwrap();
        let a = AngleTable::cached(config).unwrap();
        let b = AngleTable::cached(config).unwrap();
        assert!(Arc::ptr_eq(&a, &b), "Cache should hand out the same table");
        assert_eq!(*a, AngleTable::build(config).unwrap());
    }

    #[test]
    fn test_cached_under_concurrent_first_use() {
        let config = CordicConfig::new(22, 22, PhaseNorm::Radians).unwrap();
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(move || AngleTable::cached(config).unwrap()))
            .collect();
        let tables: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for t in &tables[1..] {
            assert_eq!(**t, *tables[0], "Racing builders must agree bit for bit");
        }
    }

    #[test]
    fn test_entries_hold_real_angle_values() {
        // Each code decodes to within one step of the true angle
        let t = table(24, 24, PhaseNorm::Radians);
        for (i, &code) in t.entries().iter().enumerate() {
            let truth = 2.0_f64.powi(-(i as i32)).atan();
            let step = 1.0 / codec::scale_of(24) as f64;
            let err = (codec::to_real(code, 24) - truth).abs();
            assert!(
                err <= step,
                "Entry {} decodes {} steps away from arctan(2^-{})",
                i,
                err / step,
                i
            );
        }
    }
}
