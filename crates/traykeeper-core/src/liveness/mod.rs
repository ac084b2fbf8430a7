mod pump;

pub(crate) use pump::{LivenessPump, LivenessSettings};
