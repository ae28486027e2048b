use crate::hash::{hash, Blake2sXof, Hasher};
use crate::params::{ChallengeBounds, FriParams};

use super::types::{Felt, TranscriptContext, TranscriptError, TranscriptLabel, TranscriptPhase};

/// Tracks the canonical label schedule.
///
/// The schedule is `[CodewordRoot(0..j), BatchChallenge]?` followed by
/// `(LayerRoot(i), FoldChallenge(i))` for every folding round, then
/// `TerminalPolynomial`, an optional `GrindingNonce`, `QueryCount`,
/// `QueryIndexStream` and finally `ProofClose`.
#[derive(Clone)]
struct StageTracker {
    stage: Stage,
    num_rounds: u8,
}

#[derive(Clone)]
enum Stage {
    Commit { absorbed_codewords: u8 },
    Round { round: u8, expect: RoundStep },
    Terminal,
    PostTerminal,
    Queries { count_absorbed: bool },
    Finalised,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum RoundStep {
    Root,
    Challenge,
}

impl StageTracker {
    fn new(num_rounds: u8) -> Self {
        Self {
            stage: Stage::Commit {
                absorbed_codewords: 0,
            },
            num_rounds,
        }
    }

    fn phase(&self) -> TranscriptPhase {
        match &self.stage {
            Stage::Commit { .. } => TranscriptPhase::Commit,
            Stage::Round { round, .. } => TranscriptPhase::Round(*round),
            Stage::Terminal => TranscriptPhase::Terminal,
            Stage::PostTerminal => TranscriptPhase::Terminal,
            Stage::Queries { .. } => TranscriptPhase::Queries,
            Stage::Finalised => TranscriptPhase::Final,
        }
    }

    fn apply_absorb(&mut self, label: TranscriptLabel) -> Result<TranscriptPhase, TranscriptError> {
        match (self.stage.clone(), label) {
            (
                Stage::Commit { absorbed_codewords },
                TranscriptLabel::CodewordRoot(idx),
            ) if idx == absorbed_codewords => {
                let next = absorbed_codewords
                    .checked_add(1)
                    .ok_or(TranscriptError::Overflow)?;
                self.stage = Stage::Commit {
                    absorbed_codewords: next,
                };
                Ok(TranscriptPhase::Commit)
            }
            (Stage::Commit { .. }, TranscriptLabel::CodewordRoot(_)) => {
                Err(TranscriptError::BoundsViolation)
            }
            (
                Stage::Commit {
                    absorbed_codewords: 0,
                },
                TranscriptLabel::LayerRoot(0),
            ) => {
                self.stage = Stage::Round {
                    round: 0,
                    expect: RoundStep::Challenge,
                };
                Ok(TranscriptPhase::Round(0))
            }
            (
                Stage::Round {
                    round,
                    expect: RoundStep::Root,
                },
                TranscriptLabel::LayerRoot(idx),
            ) if round == idx => {
                self.stage = Stage::Round {
                    round,
                    expect: RoundStep::Challenge,
                };
                Ok(TranscriptPhase::Round(round))
            }
            (
                Stage::Round {
                    expect: RoundStep::Root,
                    ..
                },
                TranscriptLabel::LayerRoot(_),
            ) => Err(TranscriptError::BoundsViolation),
            (Stage::Terminal, TranscriptLabel::TerminalPolynomial) => {
                self.stage = Stage::PostTerminal;
                Ok(TranscriptPhase::Terminal)
            }
            (Stage::PostTerminal, TranscriptLabel::GrindingNonce) => {
                self.stage = Stage::Queries {
                    count_absorbed: false,
                };
                Ok(TranscriptPhase::Queries)
            }
            (Stage::PostTerminal, TranscriptLabel::QueryCount) => {
                self.stage = Stage::Queries {
                    count_absorbed: true,
                };
                Ok(TranscriptPhase::Queries)
            }
            (
                Stage::Queries {
                    count_absorbed: false,
                },
                TranscriptLabel::QueryCount,
            ) => {
                self.stage = Stage::Queries {
                    count_absorbed: true,
                };
                Ok(TranscriptPhase::Queries)
            }
            _ => Err(TranscriptError::InvalidLabel),
        }
    }

    fn apply_challenge(
        &mut self,
        label: TranscriptLabel,
    ) -> Result<TranscriptPhase, TranscriptError> {
        match (self.stage.clone(), label) {
            (
                Stage::Commit { absorbed_codewords },
                TranscriptLabel::BatchChallenge,
            ) if absorbed_codewords > 0 => {
                self.stage = Stage::Round {
                    round: 0,
                    expect: RoundStep::Root,
                };
                Ok(TranscriptPhase::Commit)
            }
            (
                Stage::Round {
                    round,
                    expect: RoundStep::Challenge,
                },
                TranscriptLabel::FoldChallenge(idx),
            ) if round == idx => {
                if idx + 1 < self.num_rounds {
                    self.stage = Stage::Round {
                        round: idx + 1,
                        expect: RoundStep::Root,
                    };
                } else {
                    self.stage = Stage::Terminal;
                }
                Ok(TranscriptPhase::Round(idx))
            }
            (
                Stage::Round {
                    expect: RoundStep::Challenge,
                    ..
                },
                TranscriptLabel::FoldChallenge(_),
            ) => Err(TranscriptError::BoundsViolation),
            (
                Stage::Queries {
                    count_absorbed: true,
                },
                TranscriptLabel::QueryIndexStream,
            ) => Ok(TranscriptPhase::Queries),
            (Stage::Queries { .. }, TranscriptLabel::ProofClose) => {
                self.stage = Stage::Finalised;
                Ok(TranscriptPhase::Final)
            }
            (Stage::Finalised, TranscriptLabel::ProofClose) => Ok(TranscriptPhase::Final),
            _ => Err(TranscriptError::InvalidLabel),
        }
    }
}

/// Deterministic, domain-separated Fiat–Shamir transcript.
///
/// Prover and verifier drive the same instance through the same label
/// schedule; any deviation surfaces as [`TranscriptError::InvalidLabel`]
/// instead of silently diverging challenge streams.
pub struct Transcript {
    state: [u8; 32],
    phase: TranscriptPhase,
    tracker: StageTracker,
    challenge_counter: u64,
    bounds: ChallengeBounds,
}

impl Transcript {
    /// Initialises a new transcript bound to the supplied parameter set.
    pub fn new(params: &FriParams, context: TranscriptContext) -> Self {
        let params_hash = params.params_hash();
        let protocol_tag = params.transcript().protocol_tag;
        let seed = params.transcript().seed;
        let bounds = params.transcript().challenge_bounds;
        let num_rounds = params.num_rounds() as u8;

        let mut hasher = Hasher::new();
        hasher.update(b"RS-PCS-TRANSCRIPT-V1");
        hasher.update(&params_hash);
        hasher.update(&protocol_tag.to_le_bytes());
        hasher.update(&seed);
        hasher.update(&context.to_le_bytes());
        let digest = hasher.finalize().into_bytes();

        let mut transcript = Self {
            state: digest,
            phase: TranscriptPhase::Init,
            tracker: StageTracker::new(num_rounds),
            challenge_counter: 0,
            bounds,
        };

        transcript.mix_unchecked(TranscriptLabel::ParamsHash, &params_hash);
        transcript.mix_unchecked(TranscriptLabel::ProtocolTag, &protocol_tag.to_le_bytes());
        transcript.mix_unchecked(TranscriptLabel::Seed, &seed);
        transcript.mix_unchecked(TranscriptLabel::ContextTag, &context.to_le_bytes());
        transcript.phase = transcript.tracker.phase();
        transcript
    }

    /// Init framing bypasses the tracker; every later mix goes through it.
    fn mix_unchecked(&mut self, label: TranscriptLabel, bytes: &[u8]) {
        self.state = mix(self.state, label, bytes);
    }

    fn increment_challenges(&mut self) -> Result<(), TranscriptError> {
        self.challenge_counter = self
            .challenge_counter
            .checked_add(1)
            .ok_or(TranscriptError::Overflow)?;
        if self.challenge_counter > self.bounds.maximum as u64 {
            return Err(TranscriptError::BoundsViolation);
        }
        Ok(())
    }

    /// Absorbs canonical bytes under the supplied label.
    pub fn absorb_bytes(
        &mut self,
        label: TranscriptLabel,
        data: &[u8],
    ) -> Result<(), TranscriptError> {
        self.phase = self.tracker.apply_absorb(label)?;
        self.state = mix(self.state, label, data);
        Ok(())
    }

    /// Absorbs a 32-byte commitment digest.
    pub fn absorb_digest(
        &mut self,
        label: TranscriptLabel,
        digest: &[u8; 32],
    ) -> Result<(), TranscriptError> {
        self.absorb_bytes(label, digest)
    }

    /// Absorbs canonical field elements in little-endian order.
    pub fn absorb_field_elements(
        &mut self,
        label: TranscriptLabel,
        felts: &[Felt],
    ) -> Result<(), TranscriptError> {
        let mut buffer = Vec::with_capacity(felts.len() * 8);
        for felt in felts {
            buffer.extend_from_slice(&felt.to_bytes());
        }
        self.absorb_bytes(label, &buffer)
    }

    fn derive_challenge(
        &mut self,
        label: TranscriptLabel,
        output: &mut [u8],
    ) -> Result<(), TranscriptError> {
        self.increment_challenges()?;
        self.phase = self.tracker.apply_challenge(label)?;
        let mut seed = Vec::with_capacity(32 + 16 + 8);
        seed.extend_from_slice(&self.state);
        seed.extend_from_slice(&label.domain_tag());
        seed.extend_from_slice(&self.challenge_counter.to_le_bytes());
        let mut reader = Blake2sXof::new(&seed);
        reader.squeeze(output);
        self.state = mix(self.state, label, output);
        Ok(())
    }

    /// Draws a field element challenge.
    pub fn challenge_field(&mut self, label: TranscriptLabel) -> Result<Felt, TranscriptError> {
        let mut bytes = [0u8; 16];
        self.derive_challenge(label, &mut bytes)?;
        Ok(Felt::from_transcript_bytes(&bytes))
    }

    /// Draws a usize challenge within the specified exclusive range.
    pub fn challenge_usize(
        &mut self,
        label: TranscriptLabel,
        range_exclusive: usize,
    ) -> Result<usize, TranscriptError> {
        if range_exclusive == 0 {
            return Err(TranscriptError::RangeZero);
        }
        let mut bytes = [0u8; 8];
        self.derive_challenge(label, &mut bytes)?;
        let value = u64::from_le_bytes(bytes);
        Ok((value % (range_exclusive as u64)) as usize)
    }

    /// Emits `n` pseudo-random bytes from the transcript.
    pub fn challenge_bytes(
        &mut self,
        label: TranscriptLabel,
        n: usize,
    ) -> Result<Vec<u8>, TranscriptError> {
        let mut output = vec![0u8; n];
        self.derive_challenge(label, &mut output)?;
        Ok(output)
    }

    /// Returns the digest of the current transcript state.
    pub fn state_digest(&self) -> [u8; 32] {
        self.state
    }

    /// Returns the current transcript phase.
    pub fn phase(&self) -> TranscriptPhase {
        self.phase
    }

    /// Number of challenges drawn so far.
    pub fn challenges_drawn(&self) -> u64 {
        self.challenge_counter
    }
}

fn mix(state: [u8; 32], label: TranscriptLabel, data: &[u8]) -> [u8; 32] {
    let mut payload = Vec::with_capacity(32 + 16 + 8 + data.len());
    payload.extend_from_slice(&state);
    payload.extend_from_slice(&label.domain_tag());
    payload.extend_from_slice(&(data.len() as u64).to_le_bytes());
    payload.extend_from_slice(data);
    hash(&payload).into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::FriParamsBuilder;

    fn params() -> FriParams {
        FriParamsBuilder::new().build().expect("default profile")
    }

    fn run_schedule(transcript: &mut Transcript) -> Vec<Felt> {
        let rounds = 3u8;
        let mut challenges = Vec::new();
        for round in 0..rounds {
            transcript
                .absorb_digest(TranscriptLabel::LayerRoot(round), &[round; 32])
                .unwrap();
            challenges.push(
                transcript
                    .challenge_field(TranscriptLabel::FoldChallenge(round))
                    .unwrap(),
            );
        }
        transcript
            .absorb_field_elements(TranscriptLabel::TerminalPolynomial, &[Felt::from_u64(5)])
            .unwrap();
        transcript
            .absorb_bytes(TranscriptLabel::QueryCount, &30u16.to_le_bytes())
            .unwrap();
        challenges.push(
            transcript
                .challenge_field(TranscriptLabel::QueryIndexStream)
                .unwrap(),
        );
        challenges
    }

    #[test]
    fn identical_schedules_yield_identical_challenges() {
        let params = params();
        let mut a = Transcript::new(&params, TranscriptContext::FriMain);
        let mut b = Transcript::new(&params, TranscriptContext::FriMain);
        assert_eq!(run_schedule(&mut a), run_schedule(&mut b));
        assert_eq!(a.state_digest(), b.state_digest());
    }

    #[test]
    fn contexts_separate_challenge_streams() {
        let params = params();
        let mut a = Transcript::new(&params, TranscriptContext::FriMain);
        let mut b = Transcript::new(&params, TranscriptContext::Batch);
        assert_ne!(run_schedule(&mut a), run_schedule(&mut b));
    }

    #[test]
    fn out_of_order_labels_are_rejected() {
        let params = params();
        let mut transcript = Transcript::new(&params, TranscriptContext::FriMain);
        let err = transcript
            .absorb_bytes(TranscriptLabel::QueryCount, &[0, 1])
            .unwrap_err();
        assert_eq!(err, TranscriptError::InvalidLabel);
    }

    #[test]
    fn round_index_mismatch_is_rejected() {
        let params = params();
        let mut transcript = Transcript::new(&params, TranscriptContext::FriMain);
        transcript
            .absorb_digest(TranscriptLabel::LayerRoot(0), &[0u8; 32])
            .unwrap();
        let err = transcript
            .challenge_field(TranscriptLabel::FoldChallenge(1))
            .unwrap_err();
        assert_eq!(err, TranscriptError::BoundsViolation);
    }

    #[test]
    fn batch_preamble_precedes_rounds() {
        let params = params();
        let mut transcript = Transcript::new(&params, TranscriptContext::Batch);
        transcript
            .absorb_digest(TranscriptLabel::CodewordRoot(0), &[1u8; 32])
            .unwrap();
        transcript
            .absorb_digest(TranscriptLabel::CodewordRoot(1), &[2u8; 32])
            .unwrap();
        let theta = transcript
            .challenge_field(TranscriptLabel::BatchChallenge)
            .unwrap();
        assert!(theta.as_u64() < Felt::MODULUS.value);
        transcript
            .absorb_digest(TranscriptLabel::LayerRoot(0), &[3u8; 32])
            .unwrap();
    }

    #[test]
    fn challenge_budget_is_enforced() {
        let params = params();
        let maximum = params.transcript().challenge_bounds.maximum as u64;
        let mut transcript = Transcript::new(&params, TranscriptContext::FriMain);
        transcript
            .absorb_digest(TranscriptLabel::LayerRoot(0), &[0u8; 32])
            .unwrap();
        // Exhaust the budget without advancing the stage machine.
        transcript.challenge_counter = maximum;
        let err = transcript
            .challenge_field(TranscriptLabel::FoldChallenge(0))
            .unwrap_err();
        assert_eq!(err, TranscriptError::BoundsViolation);
    }
}
