//! Simulated scoring for ideas and pitches.
//!
//! `Scorer` is the seam: the shipped strategies draw bounded random numbers and
//! canned feedback; tests plug in their own generator or their own scorer.
//! Latency is a plain parameter the caller waits out before calling `score`.

use rand_core::RngCore;
use serde::Serialize;
use std::time::Duration;

use crate::dice::roll;
use crate::error::{require, Result};

pub trait Scorer {
    type Input: ?Sized;
    type Output;

    fn score(&mut self, input: &Self::Input) -> Result<Self::Output>;

    /// Simulated processing time before a result should be shown.
    fn latency(&self) -> Duration {
        Duration::ZERO
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Strong,
    Fair,
    Weak,
}

impl ScoreBand {
    fn with_cutoffs(score: u8, strong: u8, fair: u8) -> Self {
        if score >= strong {
            ScoreBand::Strong
        } else if score >= fair {
            ScoreBand::Fair
        } else {
            ScoreBand::Weak
        }
    }

    pub fn for_idea(score: u8) -> Self {
        Self::with_cutoffs(score, 80, 60)
    }

    pub fn for_pitch(score: u8) -> Self {
        Self::with_cutoffs(score, 85, 70)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaCategories {
    pub innovation: u8,
    pub feasibility: u8,
    pub market_potential: u8,
    pub technical_complexity: u8,
    pub user_value: u8,
}

impl IdeaCategories {
    pub fn entries(&self) -> [(&'static str, u8); 5] {
        [
            ("innovation", self.innovation),
            ("feasibility", self.feasibility),
            ("market potential", self.market_potential),
            ("technical complexity", self.technical_complexity),
            ("user value", self.user_value),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaEvaluation {
    pub overall_score: u8,
    pub categories: IdeaCategories,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub next_steps: Vec<String>,
    pub risk_factors: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PitchCategories {
    pub clarity: u8,
    pub impact: u8,
    pub structure: u8,
    pub storytelling: u8,
    pub call_to_action: u8,
}

impl PitchCategories {
    pub fn entries(&self) -> [(&'static str, u8); 5] {
        [
            ("clarity", self.clarity),
            ("impact", self.impact),
            ("structure", self.structure),
            ("storytelling", self.storytelling),
            ("call to action", self.call_to_action),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JudgeSimulation {
    pub questions: Vec<String>,
    pub feedback: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PitchAnalysis {
    pub overall_score: u8,
    pub categories: PitchCategories,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub suggestions: Vec<String>,
    pub judge_simulation: JudgeSimulation,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Idea scorer: overall 70-99, categories 60-99.
#[derive(Debug, Clone)]
pub struct MockIdeaScorer<R> {
    rng: R,
    latency: Duration,
}

impl<R: RngCore> MockIdeaScorer<R> {
    pub fn new(rng: R, latency: Duration) -> Self {
        Self { rng, latency }
    }
}

impl<R: RngCore> Scorer for MockIdeaScorer<R> {
    type Input = str;
    type Output = IdeaEvaluation;

    fn score(&mut self, idea: &str) -> Result<IdeaEvaluation> {
        require("idea", idea)?;
        let rng = &mut self.rng;

        Ok(IdeaEvaluation {
            overall_score: roll(rng, 70, 30),
            categories: IdeaCategories {
                innovation: roll(rng, 60, 40),
                feasibility: roll(rng, 60, 40),
                market_potential: roll(rng, 60, 40),
                technical_complexity: roll(rng, 60, 40),
                user_value: roll(rng, 60, 40),
            },
            strengths: owned(&[
                "Addresses a real problem",
                "Innovative approach to solution",
                "Strong technical foundation",
                "Clear value proposition",
            ]),
            improvements: owned(&[
                "Consider scalability challenges",
                "Research competitor solutions",
                "Define target user personas",
                "Plan monetization strategy",
            ]),
            next_steps: owned(&[
                "Create user journey maps",
                "Build minimum viable prototype",
                "Validate with potential users",
                "Define technical architecture",
            ]),
            risk_factors: owned(&[
                "Market saturation in similar solutions",
                "Technical implementation complexity",
                "User adoption challenges",
            ]),
        })
    }

    fn latency(&self) -> Duration {
        self.latency
    }
}

/// Pitch scorer: overall 75-99, categories 70-99.
#[derive(Debug, Clone)]
pub struct MockPitchScorer<R> {
    rng: R,
    latency: Duration,
}

impl<R: RngCore> MockPitchScorer<R> {
    pub fn new(rng: R, latency: Duration) -> Self {
        Self { rng, latency }
    }
}

impl<R: RngCore> Scorer for MockPitchScorer<R> {
    type Input = str;
    type Output = PitchAnalysis;

    fn score(&mut self, pitch: &str) -> Result<PitchAnalysis> {
        require("pitch", pitch)?;
        let rng = &mut self.rng;

        Ok(PitchAnalysis {
            overall_score: roll(rng, 75, 25),
            categories: PitchCategories {
                clarity: roll(rng, 70, 30),
                impact: roll(rng, 70, 30),
                structure: roll(rng, 70, 30),
                storytelling: roll(rng, 70, 30),
                call_to_action: roll(rng, 70, 30),
            },
            strengths: owned(&[
                "Clear problem statement",
                "Strong value proposition",
                "Compelling use of data",
                "Professional presentation style",
            ]),
            improvements: owned(&[
                "Add more specific metrics and KPIs",
                "Include customer testimonials or social proof",
                "Strengthen the competitive advantage section",
                "Make the call-to-action more specific and urgent",
            ]),
            suggestions: owned(&[
                "Start with a powerful hook or statistic",
                "Use the \"Problem-Solution-Market-Traction\" framework",
                "Include a compelling demo or prototype showcase",
                "End with clear next steps and funding requirements",
            ]),
            judge_simulation: JudgeSimulation {
                questions: owned(&[
                    "How will you acquire your first 1000 customers?",
                    "What is your competitive advantage?",
                    "How do you plan to monetize this solution?",
                    "What are the biggest risks to your business model?",
                    "How will you scale this solution globally?",
                ]),
                feedback: "The judges appreciate your innovative approach but would like to see more concrete validation metrics and a clearer path to market dominance.".to_string(),
            },
        })
    }

    fn latency(&self) -> Duration {
        self.latency
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::testing::StepRng;
    use crate::error::CoachError;

    #[test]
    fn test_idea_scores_in_range() {
        let mut scorer = MockIdeaScorer::new(StepRng::new(3, 11), Duration::ZERO);
        for _ in 0..50 {
            let eval = scorer.score("Campus food-waste marketplace").unwrap();
            assert!((70..100).contains(&eval.overall_score));
            assert!(eval.categories.entries().iter().all(|(_, s)| (60..100).contains(s)));
            assert_eq!(eval.strengths.len(), 4);
            assert_eq!(eval.risk_factors.len(), 3);
        }
    }

    #[test]
    fn test_zero_generator_gives_floor_scores() {
        let mut idea = MockIdeaScorer::new(StepRng::new(0, 0), Duration::ZERO);
        let eval = idea.score("x").unwrap();
        assert_eq!(eval.overall_score, 70);
        assert_eq!(eval.categories.user_value, 60);

        let mut pitch = MockPitchScorer::new(StepRng::new(0, 0), Duration::ZERO);
        let analysis = pitch.score("x").unwrap();
        assert_eq!(analysis.overall_score, 75);
        assert_eq!(analysis.categories.call_to_action, 70);
        assert_eq!(analysis.judge_simulation.questions.len(), 5);
    }

    #[test]
    fn test_blank_input_rejected() {
        let mut idea = MockIdeaScorer::new(StepRng::new(0, 1), Duration::ZERO);
        assert_eq!(
            idea.score("  \n").unwrap_err(),
            CoachError::InvalidInput { field: "idea" }
        );
        let mut pitch = MockPitchScorer::new(StepRng::new(0, 1), Duration::ZERO);
        assert_eq!(
            pitch.score("").unwrap_err(),
            CoachError::InvalidInput { field: "pitch" }
        );
    }

    #[test]
    fn test_latency_is_configurable() {
        let scorer = MockPitchScorer::new(StepRng::new(0, 1), Duration::from_millis(3000));
        assert_eq!(scorer.latency(), Duration::from_millis(3000));
        let instant = MockIdeaScorer::new(StepRng::new(0, 1), Duration::ZERO);
        assert_eq!(instant.latency(), Duration::ZERO);
    }

    /// A fixed scorer stands in wherever randomness is unwanted.
    struct Fixed(u8);

    impl Scorer for Fixed {
        type Input = str;
        type Output = u8;

        fn score(&mut self, _input: &str) -> Result<u8> {
            Ok(self.0)
        }
    }

    fn score_twice<S: Scorer<Input = str, Output = u8>>(s: &mut S) -> (u8, u8) {
        (s.score("a").unwrap(), s.score("b").unwrap())
    }

    #[test]
    fn test_fake_scorer_through_trait() {
        let mut fixed = Fixed(88);
        assert_eq!(score_twice(&mut fixed), (88, 88));
        assert_eq!(fixed.latency(), Duration::ZERO);
        assert_eq!(ScoreBand::for_idea(88), ScoreBand::Strong);
        assert_eq!(ScoreBand::for_pitch(84), ScoreBand::Fair);
        assert_eq!(ScoreBand::for_pitch(69), ScoreBand::Weak);
    }
}
