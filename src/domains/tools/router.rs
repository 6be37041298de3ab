//! Tool Router - builds the rmcp ToolRouter.
//!
//! This module builds the ToolRouter for STDIO/TCP transport by delegating
//! to the tool definitions themselves. Each tool knows how to create its own route.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use super::definitions::{NearestTool, RouteTool, TableTool};
use super::dispatcher::OsrmDispatcher;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(dispatcher: Arc<OsrmDispatcher>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(RouteTool::create_route(dispatcher.clone()))
        .with_route(NearestTool::create_route(dispatcher.clone()))
        .with_route(TableTool::create_route(dispatcher))
}

#[cfg(test)]
mod tests {
    use super::super::registry::ToolRegistry;
    use super::*;
    use crate::core::osrm::mock::MockTransport;

    struct TestServer {}

    fn test_dispatcher() -> Arc<OsrmDispatcher> {
        Arc::new(OsrmDispatcher::new(Arc::new(MockTransport::ok("{}"))))
    }

    #[test]
    fn test_build_router() {
        let router: ToolRouter<TestServer> = build_tool_router(test_dispatcher());
        let tools = router.list_all();
        assert_eq!(tools.len(), 3);

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"route"));
        assert!(names.contains(&"nearest"));
        assert!(names.contains(&"table"));
    }

    #[test]
    fn test_registry_matches_router() {
        let dispatcher = test_dispatcher();
        let registry = ToolRegistry::new(dispatcher.clone());
        let registry_names = registry.tool_names();

        let router: ToolRouter<TestServer> = build_tool_router(dispatcher);
        let router_tools = router.list_all();
        let router_names: Vec<_> = router_tools.iter().map(|t| t.name.as_ref()).collect();

        assert_eq!(registry_names.len(), router_names.len());
        for name in registry_names {
            assert!(router_names.contains(&name));
        }
    }
}
