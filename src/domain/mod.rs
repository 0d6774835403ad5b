// Domain layer: chart model and the calendar port. No calculation logic lives here.

pub mod model;
pub mod ports;
