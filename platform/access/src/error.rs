use crate::database::Permission;

pub type Result<T, E = AccessError> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AccessError {
	/// A referenced entity does not exist. Distinct from "no membership",
	/// which is a normal state the resolvers handle without erroring.
	#[error("{0} not found")]
	NotFound(&'static str),
	/// The actor lacks the specific permission an administrative operation
	/// requires. Carries the missing permission so the caller can render
	/// an actionable message.
	#[error("missing permission {missing:?}")]
	Forbidden { missing: Permission },
	/// The operation would duplicate existing state.
	#[error("{0}")]
	Conflict(&'static str),
	/// The operation is structurally invalid regardless of state.
	#[error("{0}")]
	BadRequest(&'static str),
	/// A collaborator read failed. The store logs the underlying error;
	/// this carries only what was being fetched.
	#[error("failed to fetch {0}")]
	Fetch(&'static str),
	/// A collaborator write failed.
	#[error("failed to write {0}")]
	Write(&'static str),
}

impl AccessError {
	pub fn kind(&self) -> &'static str {
		match self {
			AccessError::NotFound(_) => "NotFound",
			AccessError::Forbidden { .. } => "Forbidden",
			AccessError::Conflict(_) => "Conflict",
			AccessError::BadRequest(_) => "BadRequest",
			AccessError::Fetch(_) => "Fetch",
			AccessError::Write(_) => "Write",
		}
	}
}
