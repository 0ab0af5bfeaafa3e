/// A position in an execution plan. The runtime dispatches purely by jumping to addresses.
pub type Address = u64;

/// Addresses every flow plan fixes before any user step is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservedAddress {
    /// The flow's End record. Navigating here terminates the flow with a preset result.
    End,
    /// The flow's Precondition record; flow plans begin here.
    Precondition,
    /// The flow's Start record.
    Start,
}

impl ReservedAddress {
    pub const ALL: [ReservedAddress; 3] = [
        ReservedAddress::End,
        ReservedAddress::Precondition,
        ReservedAddress::Start,
    ];

    pub const fn address(self) -> Address {
        match self {
            ReservedAddress::End => 0,
            ReservedAddress::Precondition => 1,
            ReservedAddress::Start => 2,
        }
    }

    pub fn is_reserved(address: Address) -> bool {
        Self::ALL.iter().any(|r| r.address() == address)
    }
}

/// The first address handed to a user step.
pub const FIRST_STEP_ADDRESS: Address = ReservedAddress::Start.address() + 1;
