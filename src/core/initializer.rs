use crate::error::PopulationError;

/// What an initializer returns about the object it just filled in.
///
/// Only an explicit `false` rejects the object. A closure that returns nothing,
/// `true`, or `None` accepts it, so the common "just set some fields" initializer
/// needs no return statement. Errors carried in a `Result` abort the populate call.
pub trait InitializerOutcome {
    fn into_acceptance(self) -> Result<bool, PopulationError>;
}

impl InitializerOutcome for () {
    fn into_acceptance(self) -> Result<bool, PopulationError> {
        Ok(true)
    }
}

impl InitializerOutcome for bool {
    fn into_acceptance(self) -> Result<bool, PopulationError> {
        Ok(self)
    }
}

impl InitializerOutcome for Option<bool> {
    fn into_acceptance(self) -> Result<bool, PopulationError> {
        Ok(self != Some(false))
    }
}

impl<O, E> InitializerOutcome for Result<O, E>
where
    O: InitializerOutcome,
    E: Into<PopulationError>,
{
    fn into_acceptance(self) -> Result<bool, PopulationError> {
        self.map_err(Into::into)?.into_acceptance()
    }
}
