//! Integration tests for markwire-core services.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use markwire_core::{
    application::{ApplicationError, InsertService, WiringService, ports::Filesystem},
    domain::{
        BUILDER_MARKER, Fragment, IMPORTS_MARKER, InsertionRequest, Marker, Placement, Project,
        Resource, SCHEME_MARKER, WireMode,
    },
    error::{MarkwireError, MarkwireResult},
};
use mockall::mock;

mock! {
    pub Fs {}

    impl Filesystem for Fs {
        fn read_to_string(&self, path: &Path) -> MarkwireResult<String>;
        fn replace(&self, path: &Path, content: &str) -> MarkwireResult<()>;
        fn exists(&self, path: &Path) -> bool;
    }
}

/// Shared in-memory files, so a test can inspect what the service wrote.
#[derive(Clone, Default)]
struct SharedFs {
    files: Arc<Mutex<HashMap<PathBuf, String>>>,
}

impl SharedFs {
    fn with(path: &str, content: &str) -> Self {
        let fs = Self::default();
        fs.files
            .lock()
            .unwrap()
            .insert(PathBuf::from(path), content.to_string());
        fs
    }

    fn get(&self, path: &str) -> String {
        self.files.lock().unwrap()[Path::new(path)].clone()
    }
}

impl Filesystem for SharedFs {
    fn read_to_string(&self, path: &Path) -> MarkwireResult<String> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| {
                ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "not found".into(),
                }
                .into()
            })
    }

    fn replace(&self, path: &Path, content: &str) -> MarkwireResult<()> {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }
}

const MAIN_GO: &str = r#"package main

import (
	"flag"
	"os"

	"k8s.io/apimachinery/pkg/runtime"
	clientgoscheme "k8s.io/client-go/kubernetes/scheme"
	ctrl "sigs.k8s.io/controller-runtime"
	// +kubebuilder:scaffold:imports
)

var (
	scheme   = runtime.NewScheme()
	setupLog = ctrl.Log.WithName("setup")
)

func init() {
	_ = clientgoscheme.AddToScheme(scheme)

	// +kubebuilder:scaffold:scheme
}

func main() {
	mgr, err := ctrl.NewManager(ctrl.GetConfigOrDie(), ctrl.Options{Scheme: scheme})
	if err != nil {
		os.Exit(1)
	}

	// +kubebuilder:scaffold:builder

	setupLog.Info("starting manager")
}
"#;

fn marker(s: &str) -> Marker {
    Marker::new(s).unwrap()
}

fn fragment(s: &str) -> Fragment {
    Fragment::new(s).unwrap()
}

fn frigate() -> Resource {
    Resource::new("ship", "v1beta1", "Frigate")
}

fn operator() -> Project {
    Project::new("github.com/example/operator", "example.com")
}

// ============================================================================
// Inserter: write discipline
// ============================================================================

#[test]
fn missing_marker_never_writes() {
    let mut fs = MockFs::new();
    fs.expect_read_to_string()
        .withf(|path| path == Path::new("main.go"))
        .times(1)
        .returning(|_| Ok("// +kubebuilder:scaffold:imports\n".to_string()));
    fs.expect_replace().never();

    let service = InsertService::new(Box::new(fs));
    let request = InsertionRequest::new()
        .with(marker(IMPORTS_MARKER), [fragment("a")])
        .with(marker(SCHEME_MARKER), [fragment("b")]);

    let err = service.insert("main.go", &request).unwrap_err();
    match err {
        MarkwireError::Application(ApplicationError::MarkerNotFound { path, markers }) => {
            assert_eq!(path, PathBuf::from("main.go"));
            assert_eq!(markers, vec![SCHEME_MARKER.to_string()]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn duplicate_marker_never_writes() {
    let mut fs = MockFs::new();
    fs.expect_read_to_string()
        .returning(|_| Ok("// m\nx\n// m\n".to_string()));
    fs.expect_replace().never();

    let service = InsertService::new(Box::new(fs));
    let request = InsertionRequest::new().with(marker("// m"), [fragment("y")]);

    let err = service.insert("f.go", &request).unwrap_err();
    assert!(matches!(
        err,
        MarkwireError::Application(ApplicationError::DuplicateMarker { ref lines, .. })
            if *lines == vec![1, 3]
    ));
}

#[test]
fn success_replaces_exactly_once() {
    let mut fs = MockFs::new();
    fs.expect_read_to_string()
        .returning(|_| Ok("a\n// m1\nb\n// m2\n".to_string()));
    fs.expect_replace()
        .withf(|path, content| path == Path::new("f.go") && content == "a\n// m1\nX\nb\n// m2\nY\nZ\n")
        .times(1)
        .returning(|_, _| Ok(()));

    let service = InsertService::new(Box::new(fs));
    let request = InsertionRequest::new()
        .with(marker("// m1"), [fragment("X")])
        .with(marker("// m2"), [fragment("Y"), fragment("Z")]);

    let outcome = service.insert("f.go", &request).unwrap();
    assert!(outcome.written);
    assert_eq!(outcome.inserted_lines(), 3);
    assert_eq!(outcome.markers[0].line, 2);
    assert_eq!(outcome.markers[1].line, 4);
}

#[test]
fn empty_request_does_not_write() {
    let mut fs = MockFs::new();
    fs.expect_read_to_string()
        .returning(|_| Ok("anything\n".to_string()));
    fs.expect_replace().never();

    let service = InsertService::new(Box::new(fs));
    let outcome = service
        .insert("f.go", &InsertionRequest::new())
        .unwrap();
    assert!(!outcome.written);
    assert!(outcome.markers.is_empty());
}

#[test]
fn read_failure_is_propagated() {
    let mut fs = MockFs::new();
    fs.expect_read_to_string().returning(|p| {
        Err(ApplicationError::FilesystemError {
            path: p.to_path_buf(),
            reason: "permission denied".into(),
        }
        .into())
    });
    fs.expect_replace().never();

    let service = InsertService::new(Box::new(fs));
    let request = InsertionRequest::new().with(marker("// m"), [fragment("x")]);
    let err = service.insert("locked.go", &request).unwrap_err();
    assert!(matches!(
        err,
        MarkwireError::Application(ApplicationError::FilesystemError { .. })
    ));
}

#[test]
fn preview_does_not_write() {
    let mut fs = MockFs::new();
    fs.expect_read_to_string()
        .returning(|_| Ok("// m\n".to_string()));
    fs.expect_replace().never();

    let service = InsertService::new(Box::new(fs));
    let request = InsertionRequest::new().with(marker("// m"), [fragment("x")]);
    let rewrite = service.preview("f.go", &request).unwrap();
    assert!(rewrite.is_change());
    assert_eq!(rewrite.after, "// m\nx\n");
}

// ============================================================================
// Inserter: content semantics
// ============================================================================

#[test]
fn incremental_accumulation_below_puts_newest_next_to_marker() {
    let fs = SharedFs::with("f.go", "// m\n");
    let service = InsertService::new(Box::new(fs.clone()));

    for text in ["A", "B"] {
        let request = InsertionRequest::new().with(marker("// m"), [fragment(text)]);
        service.insert("f.go", &request).unwrap();
    }

    assert_eq!(fs.get("f.go"), "// m\nB\nA\n");
}

#[test]
fn incremental_accumulation_above_is_chronological() {
    let fs = SharedFs::with("f.go", "// m\n");
    let service = InsertService::new(Box::new(fs.clone())).with_placement(Placement::Above);

    for text in ["A", "B"] {
        let request = InsertionRequest::new().with(marker("// m"), [fragment(text)]);
        service.insert("f.go", &request).unwrap();
    }

    assert_eq!(fs.get("f.go"), "A\nB\n// m\n");
}

#[test]
fn markers_survive_repeated_insertion() {
    let fs = SharedFs::with("main.go", MAIN_GO);
    let service = InsertService::new(Box::new(fs.clone()));
    let request = InsertionRequest::new()
        .with(marker(IMPORTS_MARKER), [fragment("x")])
        .with(marker(BUILDER_MARKER), [fragment("y")]);

    service.insert("main.go", &request).unwrap();
    service.insert("main.go", &request).unwrap();

    let after = fs.get("main.go");
    assert_eq!(after.matches(IMPORTS_MARKER).count(), 1);
    assert_eq!(after.matches(BUILDER_MARKER).count(), 1);
    assert_eq!(after.matches(SCHEME_MARKER).count(), 1);
}

#[test]
fn locate_reports_missing_and_duplicate_markers() {
    let fs = SharedFs::with("f.go", "// a\n// a\n");
    let service = InsertService::new(Box::new(fs));

    let locations = service
        .locate("f.go", &[marker("// a"), marker("// b")])
        .unwrap();
    assert_eq!(locations[0].lines, vec![1, 2]);
    assert!(!locations[0].is_unique());
    assert!(locations[1].is_missing());
}

// ============================================================================
// Wiring
// ============================================================================

#[test]
fn wire_controller_into_scaffold() {
    let fs = SharedFs::with("main.go", MAIN_GO);
    let service = WiringService::new(InsertService::new(Box::new(fs.clone())));

    let outcome = service
        .wire("main.go", &frigate(), &operator(), WireMode::Controller)
        .unwrap();
    assert!(outcome.written);
    assert_eq!(outcome.markers.len(), 3);

    let after = fs.get("main.go");
    let expected_imports = "\t// +kubebuilder:scaffold:imports\n\
                            shipv1beta1 \"github.com/example/operator/api/v1beta1\"\n\
                            \"github.com/example/operator/controllers\"\n";
    assert!(after.contains(expected_imports), "{after}");

    let expected_scheme = "\t// +kubebuilder:scaffold:scheme\n\
                           _ = shipv1beta1.AddToScheme(scheme)\n";
    assert!(after.contains(expected_scheme), "{after}");

    assert!(after.contains("if err = (&controllers.FrigateReconciler{"));
    assert!(after.contains("WithName(\"Frigate\")"));
    assert!(after.contains("\"unable to create controller\", \"controller\", \"Frigate\""));
}

#[test]
fn wire_resource_touches_no_builder() {
    let fs = SharedFs::with("main.go", MAIN_GO);
    let service = WiringService::new(InsertService::new(Box::new(fs.clone())));

    service
        .wire("main.go", &frigate(), &operator(), WireMode::Resource)
        .unwrap();

    let after = fs.get("main.go");
    assert!(after.contains("_ = shipv1beta1.AddToScheme(scheme)"));
    assert!(!after.contains("controllers"));
    assert!(!after.contains("SetupWithManager"));
}

#[test]
fn wire_core_group_imports_from_k8s_api() {
    let fs = SharedFs::with("main.go", MAIN_GO);
    let service = WiringService::new(InsertService::new(Box::new(fs.clone())));

    service
        .wire(
            "main.go",
            &Resource::new("apps", "v1", "Deployment"),
            &operator(),
            WireMode::Controller,
        )
        .unwrap();

    assert!(fs.get("main.go").contains("appsv1 \"k8s.io/api/apps/v1\""));
}

#[test]
fn wire_without_builder_marker_leaves_file_alone() {
    let source = MAIN_GO.replace("\t// +kubebuilder:scaffold:builder\n", "");
    let fs = SharedFs::with("main.go", &source);
    let service = WiringService::new(InsertService::new(Box::new(fs.clone())));

    let err = service
        .wire("main.go", &frigate(), &operator(), WireMode::Webhook)
        .unwrap_err();

    assert!(err.is_marker_not_found());
    assert_eq!(fs.get("main.go"), source);
}

#[test]
fn wire_rejects_unusable_kind_before_reading() {
    let mut fs = MockFs::new();
    fs.expect_read_to_string().never();
    fs.expect_replace().never();

    let service = WiringService::new(InsertService::new(Box::new(fs)));
    let err = service
        .wire(
            "main.go",
            &Resource::new("ship", "v1", "Frig ate"),
            &operator(),
            WireMode::Controller,
        )
        .unwrap_err();
    assert!(matches!(err, MarkwireError::Domain(_)));
}

#[test]
fn controller_then_webhook_appends_both() {
    let fs = SharedFs::with("main.go", MAIN_GO);
    let service = WiringService::new(InsertService::new(Box::new(fs.clone())));

    service
        .wire("main.go", &frigate(), &operator(), WireMode::Controller)
        .unwrap();
    service
        .wire("main.go", &frigate(), &operator(), WireMode::Webhook)
        .unwrap();

    let after = fs.get("main.go");
    assert!(after.contains("SetupWithManager(mgr)"));
    assert!(after.contains("SetupWebhookWithManager(mgr)"));
    assert_eq!(after.matches("_ = shipv1beta1.AddToScheme(scheme)").count(), 2);
}
