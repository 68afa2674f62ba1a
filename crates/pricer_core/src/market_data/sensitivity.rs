//! Risk result containers.
//!
//! Curve sensitivities are first derivatives of a value with respect to the
//! continuously compounded zero rate of a named curve at a given time. They are
//! stored as unsorted `(time, value)` lists per curve so pieces computed from
//! different cash flows can simply be appended; [`MulticurveSensitivity::cleaned`]
//! sorts and merges equal times.

use std::collections::BTreeMap;

use crate::types::Currency;

use super::amount::MultipleCurrencyAmount;
use super::fx::FxMatrix;
use crate::types::CurrencyError;

/// Times closer than this are treated as the same node by `cleaned()`.
const TIME_TOLERANCE: f64 = 1.0e-12;

fn merge_points(points: &[(f64, f64)]) -> Vec<(f64, f64)> {
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a.0.total_cmp(&b.0));
    let mut merged: Vec<(f64, f64)> = Vec::with_capacity(sorted.len());
    for (t, v) in sorted {
        match merged.last_mut() {
            Some(last) if (last.0 - t).abs() < TIME_TOLERANCE => last.1 += v,
            _ => merged.push((t, v)),
        }
    }
    merged
}

/// First-order sensitivity to zero rates of named curves.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MulticurveSensitivity;
///
/// let s = MulticurveSensitivity::of_point("EUR DSC", 2.0, -1.5)
///     .plus(&MulticurveSensitivity::of_point("EUR DSC", 2.0, 0.5))
///     .cleaned();
/// assert_eq!(s.curve("EUR DSC").unwrap(), &[(2.0, -1.0)]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MulticurveSensitivity {
    sensitivities: BTreeMap<String, Vec<(f64, f64)>>,
}

impl MulticurveSensitivity {
    /// Empty sensitivity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sensitivity to one curve.
    pub fn of_curve(name: impl Into<String>, points: Vec<(f64, f64)>) -> Self {
        let mut sensitivities = BTreeMap::new();
        sensitivities.insert(name.into(), points);
        Self { sensitivities }
    }

    /// Sensitivity to a single node of one curve.
    pub fn of_point(name: impl Into<String>, time: f64, value: f64) -> Self {
        Self::of_curve(name, vec![(time, value)])
    }

    /// Appends a node to a curve.
    pub fn add_point(&mut self, name: &str, time: f64, value: f64) {
        self.sensitivities
            .entry(name.to_string())
            .or_default()
            .push((time, value));
    }

    /// Concatenation of both sensitivities.
    pub fn plus(&self, other: &Self) -> Self {
        let mut result = self.clone();
        for (name, points) in &other.sensitivities {
            result
                .sensitivities
                .entry(name.clone())
                .or_default()
                .extend_from_slice(points);
        }
        result
    }

    /// Every value multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            sensitivities: self
                .sensitivities
                .iter()
                .map(|(n, pts)| (n.clone(), pts.iter().map(|(t, v)| (*t, v * factor)).collect()))
                .collect(),
        }
    }

    /// Sorted by time with equal times merged; empty curves dropped.
    pub fn cleaned(&self) -> Self {
        Self {
            sensitivities: self
                .sensitivities
                .iter()
                .filter(|(_, pts)| !pts.is_empty())
                .map(|(n, pts)| (n.clone(), merge_points(pts)))
                .collect(),
        }
    }

    /// Nodes for one curve.
    pub fn curve(&self, name: &str) -> Option<&[(f64, f64)]> {
        self.sensitivities.get(name).map(Vec::as_slice)
    }

    /// Curve names in order.
    pub fn curve_names(&self) -> impl Iterator<Item = &str> {
        self.sensitivities.keys().map(String::as_str)
    }

    /// Iterate over `(curve, nodes)`.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[(f64, f64)])> {
        self.sensitivities
            .iter()
            .map(|(n, p)| (n.as_str(), p.as_slice()))
    }

    /// Sum of all node values of one curve: the parallel-shift sensitivity.
    pub fn total_for(&self, name: &str) -> f64 {
        self.curve(name)
            .map(|pts| pts.iter().map(|(_, v)| v).sum())
            .unwrap_or(0.0)
    }

    /// Sum of all node values over every curve.
    pub fn total(&self) -> f64 {
        self.sensitivities
            .values()
            .flat_map(|pts| pts.iter().map(|(_, v)| *v))
            .sum()
    }

    /// True when no curve is present.
    pub fn is_empty(&self) -> bool {
        self.sensitivities.is_empty()
    }

    /// Largest absolute node difference after cleaning both sides.
    pub fn max_abs_difference(&self, other: &Self) -> f64 {
        let diff = self.plus(&other.scaled(-1.0)).cleaned();
        diff.sensitivities
            .values()
            .flat_map(|pts| pts.iter().map(|(_, v)| v.abs()))
            .fold(0.0, f64::max)
    }
}

/// Curve sensitivities split by the currency they are expressed in.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultipleCurrencyMulticurveSensitivity {
    sensitivities: BTreeMap<Currency, MulticurveSensitivity>,
}

impl MultipleCurrencyMulticurveSensitivity {
    /// Empty sensitivity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sensitivity in one currency.
    pub fn of(currency: Currency, sensitivity: MulticurveSensitivity) -> Self {
        let mut sensitivities = BTreeMap::new();
        sensitivities.insert(currency, sensitivity);
        Self { sensitivities }
    }

    /// Currency-by-currency concatenation.
    pub fn plus(&self, other: &Self) -> Self {
        let mut result = self.clone();
        for (ccy, s) in &other.sensitivities {
            let merged = match result.sensitivities.get(ccy) {
                Some(existing) => existing.plus(s),
                None => s.clone(),
            };
            result.sensitivities.insert(*ccy, merged);
        }
        result
    }

    /// Every value multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            sensitivities: self
                .sensitivities
                .iter()
                .map(|(c, s)| (*c, s.scaled(factor)))
                .collect(),
        }
    }

    /// Each currency cleaned.
    pub fn cleaned(&self) -> Self {
        Self {
            sensitivities: self
                .sensitivities
                .iter()
                .map(|(c, s)| (*c, s.cleaned()))
                .collect(),
        }
    }

    /// Sensitivity expressed in `currency`.
    pub fn get(&self, currency: Currency) -> Option<&MulticurveSensitivity> {
        self.sensitivities.get(&currency)
    }

    /// Iterate in currency order.
    pub fn iter(&self) -> impl Iterator<Item = (Currency, &MulticurveSensitivity)> {
        self.sensitivities.iter().map(|(c, s)| (*c, s))
    }

    /// All currencies converted into `target` and merged.
    pub fn converted(
        &self,
        fx: &FxMatrix,
        target: Currency,
    ) -> Result<MulticurveSensitivity, CurrencyError> {
        let mut result = MulticurveSensitivity::new();
        for (ccy, s) in &self.sensitivities {
            result = result.plus(&s.scaled(fx.fx_rate(*ccy, target)?));
        }
        Ok(result.cleaned())
    }

    /// Parallel-shift sensitivity per currency.
    pub fn totals(&self) -> MultipleCurrencyAmount {
        self.sensitivities
            .iter()
            .fold(MultipleCurrencyAmount::new(), |acc, (c, s)| acc.with(*c, s.total()))
    }
}

/// Second-order sensitivity to pairs of curve nodes.
///
/// Entry `((c1, c2), (t1, t2, v))` is `∂²V / ∂r_{c1}(t1) ∂r_{c2}(t2)`. The
/// matrix is stored in full (both `(a, b)` and `(b, a)` blocks).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurveHessian {
    entries: BTreeMap<(String, String), Vec<(f64, f64, f64)>>,
}

impl CurveHessian {
    /// Empty Hessian.
    pub fn new() -> Self {
        Self::default()
    }

    /// Diagonal entry `value` at node `(name, time)`.
    pub fn of_diagonal(name: &str, time: f64, value: f64) -> Self {
        let mut h = Self::new();
        h.add_entry(name, time, name, time, value);
        h
    }

    /// Outer product `a ⊗ b`.
    pub fn outer_product(a: &MulticurveSensitivity, b: &MulticurveSensitivity) -> Self {
        let mut h = Self::new();
        for (n1, p1) in a.iter() {
            for (n2, p2) in b.iter() {
                let block = h
                    .entries
                    .entry((n1.to_string(), n2.to_string()))
                    .or_default();
                for (t1, v1) in p1 {
                    for (t2, v2) in p2 {
                        block.push((*t1, *t2, v1 * v2));
                    }
                }
            }
        }
        h
    }

    /// Symmetrised outer product `a ⊗ b + b ⊗ a`.
    pub fn symmetric_product(a: &MulticurveSensitivity, b: &MulticurveSensitivity) -> Self {
        Self::outer_product(a, b).plus(&Self::outer_product(b, a))
    }

    /// Appends an entry.
    pub fn add_entry(&mut self, name_1: &str, time_1: f64, name_2: &str, time_2: f64, value: f64) {
        self.entries
            .entry((name_1.to_string(), name_2.to_string()))
            .or_default()
            .push((time_1, time_2, value));
    }

    /// Concatenation.
    pub fn plus(&self, other: &Self) -> Self {
        let mut result = self.clone();
        for (key, block) in &other.entries {
            result
                .entries
                .entry(key.clone())
                .or_default()
                .extend_from_slice(block);
        }
        result
    }

    /// Every entry multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .map(|(k, b)| (k.clone(), b.iter().map(|(s, t, v)| (*s, *t, v * factor)).collect()))
                .collect(),
        }
    }

    /// Sorted with equal `(t1, t2)` entries merged.
    pub fn cleaned(&self) -> Self {
        let mut entries = BTreeMap::new();
        for (key, block) in &self.entries {
            let mut sorted = block.clone();
            sorted.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1)));
            let mut merged: Vec<(f64, f64, f64)> = Vec::with_capacity(sorted.len());
            for (s, t, v) in sorted {
                match merged.last_mut() {
                    Some(last)
                        if (last.0 - s).abs() < TIME_TOLERANCE
                            && (last.1 - t).abs() < TIME_TOLERANCE =>
                    {
                        last.2 += v
                    }
                    _ => merged.push((s, t, v)),
                }
            }
            if !merged.is_empty() {
                entries.insert(key.clone(), merged);
            }
        }
        Self { entries }
    }

    /// Entries of one curve pair.
    pub fn block(&self, name_1: &str, name_2: &str) -> Option<&[(f64, f64, f64)]> {
        self.entries
            .get(&(name_1.to_string(), name_2.to_string()))
            .map(Vec::as_slice)
    }

    /// Iterate over `(curve_1, curve_2, entries)`.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &[(f64, f64, f64)])> {
        self.entries
            .iter()
            .map(|((a, b), e)| (a.as_str(), b.as_str(), e.as_slice()))
    }

    /// Sum of all entries: the second derivative under a parallel shift of
    /// every curve.
    pub fn total(&self) -> f64 {
        self.entries
            .values()
            .flat_map(|b| b.iter().map(|(_, _, v)| *v))
            .sum()
    }
}

/// Sensitivity to the Black volatility surface at (expiry, tenor) points.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PresentValueBlackSwaptionSensitivity {
    points: Vec<(f64, f64, f64)>,
    generator: String,
}

impl PresentValueBlackSwaptionSensitivity {
    /// Sensitivity at a single point of the surface of the named generator.
    pub fn of_point(expiry: f64, tenor: f64, value: f64, generator: impl Into<String>) -> Self {
        Self {
            points: vec![(expiry, tenor, value)],
            generator: generator.into(),
        }
    }

    /// Concatenation; equal points are merged.
    pub fn plus(&self, other: &Self) -> Self {
        let mut points = self.points.clone();
        for (e, t, v) in &other.points {
            match points.iter_mut().find(|p| {
                (p.0 - e).abs() < TIME_TOLERANCE && (p.1 - t).abs() < TIME_TOLERANCE
            }) {
                Some(p) => p.2 += v,
                None => points.push((*e, *t, *v)),
            }
        }
        let generator = if self.generator.is_empty() {
            other.generator.clone()
        } else {
            self.generator.clone()
        };
        Self { points, generator }
    }

    /// Every value multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            points: self.points.iter().map(|(e, t, v)| (*e, *t, v * factor)).collect(),
            generator: self.generator.clone(),
        }
    }

    /// `(expiry, tenor, value)` points.
    pub fn points(&self) -> &[(f64, f64, f64)] {
        &self.points
    }

    /// Name of the swap generator the surface belongs to.
    pub fn generator(&self) -> &str {
        &self.generator
    }

    /// Sum of all point values.
    pub fn total(&self) -> f64 {
        self.points.iter().map(|(_, _, v)| v).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cleaned_merges_and_sorts() {
        let mut s = MulticurveSensitivity::of_curve("A", vec![(3.0, 1.0), (1.0, 2.0)]);
        s.add_point("A", 3.0, 0.5);
        s.add_point("B", 0.5, -1.0);
        let c = s.cleaned();
        assert_eq!(c.curve("A").unwrap(), &[(1.0, 2.0), (3.0, 1.5)]);
        assert_eq!(c.curve_names().collect::<Vec<_>>(), vec!["A", "B"]);
        assert_relative_eq!(c.total(), 2.5);
        assert_relative_eq!(c.total_for("B"), -1.0);
        assert_eq!(c.total_for("Z"), 0.0);
    }

    #[test]
    fn test_max_abs_difference() {
        let a = MulticurveSensitivity::of_curve("A", vec![(1.0, 1.0), (2.0, 2.0)]);
        let b = MulticurveSensitivity::of_curve("A", vec![(2.0, 2.5), (1.0, 1.0)]);
        assert_relative_eq!(a.max_abs_difference(&b), 0.5);
    }

    #[test]
    fn test_multiple_currency_conversion() {
        let fx = FxMatrix::builder()
            .add_rate(Currency::EUR, Currency::USD, 1.5)
            .build()
            .unwrap();
        let s = MultipleCurrencyMulticurveSensitivity::of(
            Currency::EUR,
            MulticurveSensitivity::of_point("X", 1.0, 2.0),
        )
        .plus(&MultipleCurrencyMulticurveSensitivity::of(
            Currency::USD,
            MulticurveSensitivity::of_point("X", 1.0, 1.0),
        ));
        let usd = s.converted(&fx, Currency::USD).unwrap();
        assert_eq!(usd.curve("X").unwrap(), &[(1.0, 4.0)]);
        assert_relative_eq!(s.totals().amount(Currency::EUR), 2.0);
        assert_relative_eq!(s.scaled(2.0).get(Currency::USD).unwrap().total(), 2.0);
    }

    #[test]
    fn test_hessian_outer_product() {
        let a = MulticurveSensitivity::of_curve("A", vec![(1.0, 2.0), (2.0, 3.0)]);
        let b = MulticurveSensitivity::of_point("B", 5.0, -1.0);
        let h = CurveHessian::symmetric_product(&a, &b);
        assert_eq!(h.block("A", "B").unwrap(), &[(1.0, 5.0, -2.0), (2.0, 5.0, -3.0)]);
        assert_eq!(h.block("B", "A").unwrap().len(), 2);
        assert_relative_eq!(h.total(), -10.0);

        let diag = CurveHessian::of_diagonal("A", 1.0, 4.0)
            .plus(&CurveHessian::of_diagonal("A", 1.0, 1.0))
            .scaled(2.0)
            .cleaned();
        assert_eq!(diag.block("A", "A").unwrap(), &[(1.0, 1.0, 10.0)]);
    }

    #[test]
    fn test_black_sensitivity_merge() {
        let a = PresentValueBlackSwaptionSensitivity::of_point(1.0, 5.0, 10.0, "EUR1YEURIBOR6M");
        let b = PresentValueBlackSwaptionSensitivity::of_point(1.0, 5.0, 2.0, "EUR1YEURIBOR6M");
        let c = PresentValueBlackSwaptionSensitivity::of_point(2.0, 5.0, 1.0, "EUR1YEURIBOR6M");
        let sum = a.plus(&b).plus(&c).scaled(-1.0);
        assert_eq!(sum.points(), &[(1.0, 5.0, -12.0), (2.0, 5.0, -1.0)]);
        assert_eq!(sum.generator(), "EUR1YEURIBOR6M");
        assert_relative_eq!(sum.total(), -13.0);
    }
}
