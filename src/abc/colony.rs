//! The bee colony: food sources, trial counters and the three phases.

use super::config::AbcConfig;
use crate::error::MmkpError;
use crate::model::{DataSet, Draft, Solution};
use crate::repair::Toolkit;
use crate::search::streams::map_members;
use crate::search::{
    best_of, check_instance, initial_population, offer, other_than, roulette, PopulationSearch,
    SearchConfig,
};
use rand::Rng;
use tracing::debug;

/// Artificial Bee Colony optimizer for the MMKP.
///
/// Each generation runs three phases over the food sources:
///
/// 1. **Employed bees**: every source is blended with a random partner
///    source, repaired, and replaced if the result wins under the
///    competitive order; otherwise its trial counter grows.
/// 2. **Onlooker bees**: sources are picked by roulette on profit and
///    improved the same way.
/// 3. **Scouts**: sources whose trial counter exceeds the limit are
///    replaced by fresh random solutions.
///
/// The best solution is kept as a separate snapshot, so abandoning the
/// source it came from never loses it.
pub struct Abc<'a> {
    toolkit: Toolkit<'a>,
    config: AbcConfig,
    sources: Vec<Solution>,
    trials: Vec<usize>,
    best: Option<Solution>,
    evaluations: usize,
}

impl<'a> Abc<'a> {
    /// Creates a colony over `data`.
    ///
    /// Fails on an invalid configuration or an instance without classes or
    /// dimensions.
    pub fn new(data: &'a DataSet, config: AbcConfig) -> Result<Self, MmkpError> {
        config.validate()?;
        check_instance(data)?;
        Ok(Self {
            toolkit: Toolkit::new(data).with_strategy(config.search.repair),
            config,
            sources: Vec::new(),
            trials: Vec::new(),
            best: None,
            evaluations: 0,
        })
    }

    /// Creates a colony with [`AbcConfig::default`].
    pub fn with_defaults(data: &'a DataSet) -> Result<Self, MmkpError> {
        Self::new(data, AbcConfig::default())
    }

    /// The colony configuration.
    pub fn config(&self) -> &AbcConfig {
        &self.config
    }

    /// Trial counter of every food source.
    pub fn trials(&self) -> &[usize] {
        &self.trials
    }

    fn employed_phase<R: Rng>(&mut self, rng: &mut R) {
        let n = self.sources.len();
        let targets: Vec<usize> = (0..n).collect();
        self.forage(&targets, rng);
    }

    fn onlooker_phase<R: Rng>(&mut self, rng: &mut R) {
        let weights: Vec<f64> = self
            .sources
            .iter()
            .map(|s| if s.is_feasible() { s.profit() } else { 0.0 })
            .collect();
        let targets: Vec<usize> = (0..self.config.onlookers())
            .map(|_| roulette(&weights, rng))
            .collect();
        self.forage(&targets, rng);
    }

    /// Builds one neighbor per target from the current snapshot, then
    /// applies them in order.
    fn forage<R: Rng>(&mut self, targets: &[usize], rng: &mut R) {
        let data = self.toolkit.data();
        let toolkit = &self.toolkit;
        let sources = &self.sources;
        let rate = self.config.flip_rate;
        let n = sources.len();

        let candidates = map_members(rng, targets.len(), self.config.search.parallel, |m, r| {
            let k = targets[m];
            let partner = other_than(k, n, r);
            let draft = blend(data, &sources[k], &sources[partner], rate, r);
            toolkit.make_feasible(&draft, r).0
        });
        self.evaluations += candidates.len();

        for (&k, candidate) in targets.iter().zip(candidates) {
            if candidate.is_better_than(&self.sources[k]) {
                offer(&mut self.best, &candidate);
                self.sources[k] = candidate;
                self.trials[k] = 0;
            } else {
                self.trials[k] += 1;
            }
        }
    }

    fn scout_phase<R: Rng>(&mut self, rng: &mut R) {
        let data = self.toolkit.data();
        for k in 0..self.sources.len() {
            if self.trials[k] <= self.config.trial_limit {
                continue;
            }
            debug!(
                source = k,
                trials = self.trials[k],
                profit = self.sources[k].profit(),
                "scout abandons food source"
            );
            let mut fresh = Solution::random(data, rng);
            let _ = self.toolkit.repair(&mut fresh, rng);
            self.evaluations += 1;
            offer(&mut self.best, &fresh);
            self.sources[k] = fresh;
            self.trials[k] = 0;
        }
    }
}

impl PopulationSearch for Abc<'_> {
    fn name(&self) -> &'static str {
        "abc"
    }

    fn search_config(&self) -> &SearchConfig {
        &self.config.search
    }

    fn initialize<R: Rng>(&mut self, rng: &mut R) -> Result<(), MmkpError> {
        let search = &self.config.search;
        self.sources = initial_population(
            &self.toolkit,
            &search.init,
            search.population_size,
            search.parallel,
            rng,
        )?;
        self.trials = vec![0; self.sources.len()];
        self.evaluations = self.sources.len();
        self.best = best_of(&self.sources).cloned();
        Ok(())
    }

    fn step<R: Rng>(&mut self, rng: &mut R) {
        self.employed_phase(rng);
        self.onlooker_phase(rng);
        self.scout_phase(rng);
    }

    fn current_best(&self) -> Option<&Solution> {
        self.best.as_ref()
    }

    fn population(&self) -> &[Solution] {
        &self.sources
    }

    fn evaluations(&self) -> usize {
        self.evaluations
    }
}

/// Binary neighbor move: for every item bit `x` of `current` and `y` of
/// `partner`, `x ^ (o & (x | y))` with `o` set at probability `rate`.
///
/// A touched bit of the current selection is cleared and a touched bit
/// only the partner holds is set, so the draft drifts toward the partner.
fn blend<R: Rng>(
    data: &DataSet,
    current: &Solution,
    partner: &Solution,
    rate: f64,
    rng: &mut R,
) -> Draft {
    let mut draft = Draft::empty(data);
    for c in 0..data.class_count() {
        for i in 0..data.items_in(c) {
            let x = current.selected(c) == i;
            let y = partner.selected(c) == i;
            let o = rng.random_bool(rate);
            draft.set(c, i, x ^ (o & (x | y)));
        }
    }
    draft
}
