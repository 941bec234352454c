pub mod routing;

pub use routing::{failure_response, BuildRouteTableUseCase, RouteQueryUseCase};
