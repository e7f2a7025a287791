//! Runtime configuration for one pipeline invocation.
//!
//! The pipeline never reads globals; a `Config` is built once (by the CLI
//! or an embedding caller) and threaded by reference through every stage.

/// What to do when a line batch comes back without a result array at all.
///
/// The upstream service occasionally answers a read with an empty body
/// instead of `[]`. Tolerating that silently can mask real failures, so
/// the choice is explicit and the event is always logged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmptyBatchPolicy {
    /// Count the batch as zero records and keep going (upstream behavior).
    Tolerate,
    /// Abort the fetch with a shape error.
    Fail,
}

/// Institutional condonation policy, injected rather than baked in.
#[derive(Clone, Debug)]
pub struct CondonationPolicy {
    /// Flat fee charged per at-risk course when the student is eligible.
    pub fee: u32,
    /// Students whose admission-year digits are at or above this value
    /// fall under the condonation scheme.
    pub batch_threshold: u32,
    /// Subject names that mark a student as having opted for a minor.
    /// Matching is a case-insensitive prefix test against course names.
    pub minor_subjects: Vec<String>,
}

impl Default for CondonationPolicy {
    fn default() -> Self {
        Self {
            fee: 500,
            batch_threshold: 24,
            minor_subjects: Vec::new(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    /// Root URL of the ERP instance.
    pub base_url: String,
    /// ERP database name sent with the authenticate call.
    pub database: String,
    /// Max line-record ids per read request. The upstream enforces an
    /// undocumented payload limit; 80 is the empirically safe value.
    pub batch_size: usize,
    pub empty_batch: EmptyBatchPolicy,
    pub condonation: CondonationPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://erp.vidyaacademy.ac.in".to_string(),
            database: "liveone".to_string(),
            batch_size: 80,
            empty_batch: EmptyBatchPolicy::Tolerate,
            condonation: CondonationPolicy::default(),
        }
    }
}
