//! Mapping between resource state and remote wire types.
//!
//! Each resource model implements [`ResourceMapper`] with two pure
//! transforms: state to request payload, and authoritative remote entity
//! back onto state. Neither touches the network nor fails.

/// Pure conversion between a resource model and its remote representation.
pub trait ResourceMapper {
    /// Payload sent on create and update.
    type Request;
    /// Entity returned by the remote system.
    type Remote;

    /// Build the upstream payload from this state.
    fn to_request(&self) -> Self::Request;

    /// Overwrite every tracked field from the remote entity.
    ///
    /// This is a full overwrite, not a merge: fields the model does not
    /// track are dropped.
    fn set_state(&mut self, remote: &Self::Remote);

    /// Build fresh state from a remote entity.
    fn from_remote(remote: &Self::Remote) -> Self
    where
        Self: Default + Sized,
    {
        let mut state = Self::default();
        state.set_state(remote);
        state
    }
}
