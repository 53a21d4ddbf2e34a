use std::sync::Arc;

use http::Method;
use trie_router::{
    router::{LookupResult, Router},
    table::{HandlerName, MiddlewareName},
    RouteTable,
};

type ZooRouter = Router<HandlerName, MiddlewareName>;

fn example_table() -> &'static str {
    r#"
middleware: [request_log]
routes:
  - path: /
    handlers:
      get: root_handler
  - path: /zoo/animals
    handlers:
      get: get_animals
      post: create_animal
    middleware: [auth]
  - path: /zoo/animals/:id
    handlers:
      get: get_animal
      put: update_animal
      patch: patch_animal
      delete: delete_animal
  - path: /zoo/animals/new
    handlers:
      get: new_animal_form
  - path: /zoo/animals/:id/toys/:toy_id
    handlers:
      get: animal_toy
  - path: /zoo/health
    handlers:
      head: health_check
      options: supported_ops
      trace: trace_route
"#
}

fn zoo_router() -> ZooRouter {
    let table = RouteTable::from_yaml(example_table()).expect("failed to parse route table");
    Router::new(table.build().expect("failed to build trie"))
}

fn assert_route_match(router: &ZooRouter, method: Method, path: &str, expected_handler: &str) {
    match router.resolve(path, &method) {
        Some(found) => {
            println!("✅ {} {} → {}", method, path, found.handler);
            assert_eq!(
                &*found.handler, expected_handler,
                "Handler mismatch for {} {}: expected '{}', got '{}'",
                method, path, expected_handler, found.handler
            );
        }
        None => {
            println!("❌ {} {} → no match", method, path);
            assert_eq!(
                expected_handler, "<none>",
                "Expected route to match for {} {}",
                method, path
            );
        }
    }
}

fn middleware_names(found: &LookupResult<HandlerName, MiddlewareName>) -> Vec<&str> {
    found.middleware.iter().map(|m| &**m).collect()
}

#[test]
fn test_router_root() {
    let router = zoo_router();
    assert_route_match(&router, Method::GET, "/", "root_handler");
}

#[test]
fn test_router_get_animals() {
    let router = zoo_router();
    assert_route_match(&router, Method::GET, "/zoo/animals", "get_animals");
}

#[test]
fn test_router_post_animals() {
    let router = zoo_router();
    assert_route_match(&router, Method::POST, "/zoo/animals", "create_animal");
}

#[test]
fn test_router_animal_by_id_all_verbs() {
    let router = zoo_router();
    assert_route_match(&router, Method::GET, "/zoo/animals/123", "get_animal");
    assert_route_match(&router, Method::PUT, "/zoo/animals/123", "update_animal");
    assert_route_match(&router, Method::PATCH, "/zoo/animals/123", "patch_animal");
    assert_route_match(&router, Method::DELETE, "/zoo/animals/123", "delete_animal");
    assert_route_match(&router, Method::POST, "/zoo/animals/123", "<none>");
}

#[test]
fn test_router_literal_new_outranks_id() {
    let router = zoo_router();
    assert_route_match(&router, Method::GET, "/zoo/animals/new", "new_animal_form");
    // Only GET is registered on the literal; DELETE does not fall back to :id
    assert_route_match(&router, Method::DELETE, "/zoo/animals/new", "<none>");
}

#[test]
fn test_router_nested_params() {
    let router = zoo_router();
    let found = router
        .resolve("/zoo/animals/7/toys/ball", &Method::GET)
        .expect("route should match");
    assert_eq!(&*found.handler, "animal_toy");
    assert_eq!(found.params.len(), 2);
    assert_eq!(found.params.get("id"), Some("7"));
    assert_eq!(found.params.get("toy_id"), Some("ball"));
    let map = found.params.to_map();
    assert_eq!(map.get("toy_id").map(String::as_str), Some("ball"));
}

#[test]
fn test_router_health_verbs() {
    let router = zoo_router();
    assert_route_match(&router, Method::HEAD, "/zoo/health", "health_check");
    assert_route_match(&router, Method::OPTIONS, "/zoo/health", "supported_ops");
    assert_route_match(&router, Method::TRACE, "/zoo/health", "trace_route");
    assert_route_match(&router, Method::GET, "/zoo/health", "<none>");
}

#[test]
fn test_router_unknown_paths() {
    let router = zoo_router();
    assert_route_match(&router, Method::GET, "/zoo", "<none>");
    assert_route_match(&router, Method::GET, "/does/not/exist", "<none>");
    assert_route_match(&router, Method::GET, "/zoo/animals/1/toys", "<none>");
}

#[test]
fn test_router_middleware_scoping() {
    let router = zoo_router();
    let root = router.resolve("/", &Method::GET).unwrap();
    assert_eq!(middleware_names(&root), vec!["request_log"]);

    let animals = router.resolve("/zoo/animals", &Method::GET).unwrap();
    assert_eq!(middleware_names(&animals), vec!["request_log", "auth"]);

    let toy = router.resolve("/zoo/animals/1/toys/2", &Method::GET).unwrap();
    assert_eq!(middleware_names(&toy), vec!["request_log", "auth"]);

    let health = router.resolve("/zoo/health", &Method::HEAD).unwrap();
    assert_eq!(middleware_names(&health), vec!["request_log"]);
}

#[test]
fn test_router_slash_normalization() {
    let router = zoo_router();
    assert_route_match(&router, Method::GET, "zoo/animals/", "get_animals");
    assert_route_match(&router, Method::GET, "//zoo//animals//5", "get_animal");
}

#[test]
fn test_router_cache_returns_same_result() {
    let router = zoo_router();
    let first = router.resolve("/zoo/animals/5", &Method::GET).unwrap();
    let walks = router.stats().walks();
    let second = router.resolve("/zoo/animals/5", &Method::GET).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(router.stats().walks(), walks);
    assert!(Arc::ptr_eq(&first.handler, &second.handler));
}

#[test]
fn test_router_allowed_methods() {
    let router = zoo_router();
    assert_eq!(
        router.allowed_methods("/zoo/animals/9"),
        vec![Method::DELETE, Method::GET, Method::PATCH, Method::PUT]
    );
    assert_eq!(
        router.allowed_methods("/zoo/health"),
        vec![Method::HEAD, Method::OPTIONS, Method::TRACE]
    );
    assert!(router.allowed_methods("/zoo/cages").is_empty());
}

#[test]
fn test_router_shared_across_threads() {
    let router = Arc::new(zoo_router());
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let router = Arc::clone(&router);
            std::thread::spawn(move || {
                for i in 0..250 {
                    let path = format!("/zoo/animals/{}/toys/{}", t, i % 10);
                    let found = router.resolve(&path, &Method::GET).unwrap();
                    assert_eq!(&*found.handler, "animal_toy");
                    assert_eq!(found.params.get("id"), Some(t.to_string().as_str()));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(router.cache().path_count(), 40);
}
