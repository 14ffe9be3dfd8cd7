pub mod analyze_route;
pub mod offer_request;
