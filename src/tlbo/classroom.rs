//! Learners, teachers and the two TLBO phases over item marks.

use super::config::TlboConfig;
use crate::error::MmkpError;
use crate::model::{DataSet, Draft, Solution};
use crate::repair::Toolkit;
use crate::search::streams::map_members;
use crate::search::{
    best_of, check_instance, initial_population, offer, other_than, PopulationSearch,
    SearchConfig,
};
use rand::Rng;

/// Teaching-Learning-Based Optimization for the MMKP.
///
/// Learners are ranked under the competitive order and split into
/// classrooms. In the teacher phase each learner moves toward its
/// classroom's teacher and away from the classroom mean (the median
/// learner). In the learner phase each learner moves toward a random peer
/// with higher profit, or away from one without. A move is a bitwise rule
/// over item marks; the resulting draft is repaired and replaces the
/// learner only if it wins.
pub struct Tlbo<'a> {
    toolkit: Toolkit<'a>,
    config: TlboConfig,
    learners: Vec<Solution>,
    best: Option<Solution>,
    evaluations: usize,
}

#[derive(Debug, Clone, Copy)]
struct Lesson {
    learner: usize,
    teacher: usize,
    mean: usize,
}

impl<'a> Tlbo<'a> {
    /// Creates an optimizer over `data`.
    pub fn new(data: &'a DataSet, config: TlboConfig) -> Result<Self, MmkpError> {
        config.validate()?;
        check_instance(data)?;
        Ok(Self {
            toolkit: Toolkit::new(data).with_strategy(config.search.repair),
            config,
            learners: Vec::new(),
            best: None,
            evaluations: 0,
        })
    }

    /// Creates an optimizer with [`TlboConfig::default`].
    pub fn with_defaults(data: &'a DataSet) -> Result<Self, MmkpError> {
        Self::new(data, TlboConfig::default())
    }

    /// The optimizer configuration.
    pub fn config(&self) -> &TlboConfig {
        &self.config
    }

    /// Learner indices, best first. Stable, so ties keep population order.
    fn ranking(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.learners.len()).collect();
        order.sort_by(|&a, &b| self.learners[b].compare(&self.learners[a]));
        order
    }

    fn lessons<R: Rng>(&self, rng: &mut R) -> Vec<Lesson> {
        let ranking = self.ranking();
        let size = match self.config.classroom_size {
            0 => ranking.len(),
            s => s,
        };

        let mut lessons = Vec::with_capacity(ranking.len());
        for room in ranking.chunks(size) {
            let teacher = if self.config.random_teacher {
                room[rng.random_range(0..(room.len() / 10).max(1))]
            } else {
                room[0]
            };
            let mean = room[room.len() / 2];
            lessons.extend(
                room.iter()
                    .filter(|&&k| k != teacher)
                    .map(|&learner| Lesson {
                        learner,
                        teacher,
                        mean,
                    }),
            );
        }
        lessons
    }

    fn teacher_phase<R: Rng>(&mut self, rng: &mut R) {
        let lessons = self.lessons(rng);
        let data = self.toolkit.data();
        let toolkit = &self.toolkit;
        let learners = &self.learners;

        let candidates = map_members(rng, lessons.len(), self.config.search.parallel, |m, r| {
            let l = lessons[m];
            let draft = teach(
                data,
                &learners[l.learner],
                &learners[l.teacher],
                &learners[l.mean],
                r,
            );
            toolkit.make_feasible(&draft, r).0
        });
        self.admit(lessons.iter().map(|l| l.learner), candidates);
    }

    fn learner_phase<R: Rng>(&mut self, rng: &mut R) {
        let n = self.learners.len();
        let data = self.toolkit.data();
        let toolkit = &self.toolkit;
        let learners = &self.learners;

        let candidates = map_members(rng, n, self.config.search.parallel, |k, r| {
            let peer = other_than(k, n, r);
            let toward = learns_toward(&learners[k], &learners[peer]);
            let draft = learn(data, &learners[k], &learners[peer], toward, r);
            toolkit.make_feasible(&draft, r).0
        });
        self.admit(0..n, candidates);
    }

    fn admit(&mut self, targets: impl Iterator<Item = usize>, candidates: Vec<Solution>) {
        self.evaluations += candidates.len();
        for (k, candidate) in targets.zip(candidates) {
            if candidate.is_better_than(&self.learners[k]) {
                offer(&mut self.best, &candidate);
                self.learners[k] = candidate;
            }
        }
    }
}

impl PopulationSearch for Tlbo<'_> {
    fn name(&self) -> &'static str {
        "tlbo"
    }

    fn search_config(&self) -> &SearchConfig {
        &self.config.search
    }

    fn initialize<R: Rng>(&mut self, rng: &mut R) -> Result<(), MmkpError> {
        let search = &self.config.search;
        self.learners = initial_population(
            &self.toolkit,
            &search.init,
            search.population_size,
            search.parallel,
            rng,
        )?;
        self.evaluations = self.learners.len();
        self.best = best_of(&self.learners).cloned();
        Ok(())
    }

    fn step<R: Rng>(&mut self, rng: &mut R) {
        self.teacher_phase(rng);
        self.learner_phase(rng);
    }

    fn current_best(&self) -> Option<&Solution> {
        self.best.as_ref()
    }

    fn population(&self) -> &[Solution] {
        &self.learners
    }

    fn evaluations(&self) -> usize {
        self.evaluations
    }
}

fn bit(sol: &Solution, c: usize, i: usize) -> i32 {
    i32::from(sol.selected(c) == i)
}

/// A learner moves toward a peer with higher profit, feasible or not,
/// and away from any other.
fn learns_toward(current: &Solution, peer: &Solution) -> bool {
    peer.profit() > current.profit()
}

/// Teacher move: `x + t - tf * m > 0` per item, with teaching factor
/// `tf` drawn from {1, 2} for every item.
fn teach<R: Rng>(
    data: &DataSet,
    current: &Solution,
    teacher: &Solution,
    mean: &Solution,
    rng: &mut R,
) -> Draft {
    let mut draft = Draft::empty(data);
    for c in 0..data.class_count() {
        for i in 0..data.items_in(c) {
            let tf = rng.random_range(1..=2);
            let v = bit(current, c, i) + bit(teacher, c, i) - tf * bit(mean, c, i);
            draft.set(c, i, v > 0);
        }
    }
    draft
}

/// Learner move with `r` drawn from {0, 1} per item. Toward a better
/// peer: `x + r * (y - x) > 0`. Away from a worse one: `x - r * y > 0`,
/// which drops items shared with the peer.
fn learn<R: Rng>(
    data: &DataSet,
    current: &Solution,
    peer: &Solution,
    toward: bool,
    rng: &mut R,
) -> Draft {
    let mut draft = Draft::empty(data);
    for c in 0..data.class_count() {
        for i in 0..data.items_in(c) {
            let r = i32::from(rng.random_bool(0.5));
            let (x, y) = (bit(current, c, i), bit(peer, c, i));
            let v = if toward { x + r * (y - x) } else { x - r * y };
            draft.set(c, i, v > 0);
        }
    }
    draft
}
