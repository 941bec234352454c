mod build_route_table;
mod route_query;

pub use build_route_table::BuildRouteTableUseCase;
pub use route_query::{failure_response, RouteQueryUseCase};
