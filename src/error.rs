use std::backtrace::Backtrace;
use std::error::Error as StdError;
use std::fmt;

use alloy::primitives::ChainId;

use crate::ctf::CtfError;

/// Coarse classification of a failed operation. The exact failure is the boxed source.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Kind {
    /// Malformed input, e.g. an out-of-range outcome slot count
    Validation,
    /// A condition is in the wrong lifecycle state for the operation
    Condition,
    /// Collateral, allowance or position balance is short
    Balance,
    /// Arithmetic overflow, a declining collaborator or missing configuration
    Internal,
}

/// Error returned by every fallible operation of the crate.
///
/// Nothing was committed when an operation returns this error.
#[derive(Debug)]
pub struct Error {
    kind: Kind,
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
    backtrace: Backtrace,
}

impl Error {
    pub fn with_source<S: StdError + Send + Sync + 'static>(kind: Kind, source: S) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
            backtrace: Backtrace::capture(),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> Kind {
        self.kind
    }

    #[must_use]
    pub const fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }

    #[must_use]
    pub fn inner(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.source.as_deref()
    }

    #[must_use]
    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        self.inner()?.downcast_ref::<E>()
    }

    /// The ledger failure behind this error, if any.
    #[must_use]
    pub fn ctf(&self) -> Option<&CtfError> {
        self.downcast_ref::<CtfError>()
    }

    /// Rejects the value of the request field `field`.
    pub fn validation<S: Into<String>>(field: &'static str, reason: S) -> Self {
        Validation {
            field,
            reason: reason.into(),
        }
        .into()
    }

    #[must_use]
    pub fn missing_contract_config(chain_id: ChainId) -> Self {
        MissingContractConfig { chain_id }.into()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            Some(src) => write!(f, "{} error: {src}", self.kind),
            None => write!(f, "{} error", self.kind),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn StdError + 'static))
    }
}

#[non_exhaustive]
#[derive(Debug)]
pub struct Validation {
    pub field: &'static str,
    pub reason: String,
}

impl fmt::Display for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: {}", self.field, self.reason)
    }
}

impl StdError for Validation {}

impl From<Validation> for Error {
    fn from(err: Validation) -> Self {
        Error::with_source(Kind::Validation, err)
    }
}

/// No deployed conditional tokens engine is known for the chain.
#[non_exhaustive]
#[derive(Debug, Clone, Copy)]
pub struct MissingContractConfig {
    pub chain_id: ChainId,
}

impl fmt::Display for MissingContractConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no custody configured for chain id {}", self.chain_id)
    }
}

impl StdError for MissingContractConfig {}

impl From<MissingContractConfig> for Error {
    fn from(err: MissingContractConfig) -> Self {
        Error::with_source(Kind::Internal, err)
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::B256;

    use super::*;

    #[test]
    fn missing_contract_config_display_should_succeed() {
        let error = Error::missing_contract_config(1);

        assert_eq!(error.kind(), Kind::Internal);
        assert_eq!(
            error.to_string(),
            "internal error: no custody configured for chain id 1"
        );
        assert!(error.ctf().is_none(), "not a ledger failure");
    }

    #[test]
    fn validation_names_the_rejected_field() {
        let error = Error::validation("outcome_index", "must be below 256");

        assert_eq!(error.kind(), Kind::Validation);
        assert_eq!(
            error.to_string(),
            "validation error: invalid outcome_index: must be below 256"
        );
        let inner = error
            .downcast_ref::<Validation>()
            .expect("source should be Validation");
        assert_eq!(inner.field, "outcome_index");
    }

    #[test]
    fn ctf_should_expose_ledger_failure() {
        let error = Error::from(CtfError::NotResolved(B256::ZERO));

        assert_eq!(error.kind(), Kind::Condition);
        assert_eq!(error.ctf(), Some(&CtfError::NotResolved(B256::ZERO)));
    }
}
