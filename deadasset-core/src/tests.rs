//! End-to-end tests over throwaway Laravel trees.

use crate::*;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

fn write_file(file: &Path, content: &str) {
    fs::create_dir_all(file.parent().unwrap()).unwrap();
    fs::write(file, content).unwrap();
}

fn setup_temp_project() -> PathBuf {
    let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir()
        .join("deadasset_tests")
        .join(format!("{}_{}", timestamp, id));

    if dir.exists() {
        fs::remove_dir_all(&dir).ok();
    }
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// A small but realistic Laravel tree.
fn laravel_fixture() -> PathBuf {
    let root = setup_temp_project();
    let files: &[(&str, &str)] = &[
        ("artisan", "#!/usr/bin/env php\n"),
        (
            "routes/web.php",
            r#"<?php

use App\Http\Controllers\DashboardController;
use Illuminate\Support\Facades\Route;

Route::get('/', function () {
    return view('welcome');
});

Route::get('/dashboard', [DashboardController::class, 'index']);
Route::resource('users', Admin\UserController::class);
"#,
        ),
        ("routes/console.php", "<?php\n"),
        (
            "app/Http/Controllers/DashboardController.php",
            "<?php\nclass DashboardController { public function index() { return view('dashboard.index'); } }\n",
        ),
        (
            "app/Http/Controllers/Admin/UserController.php",
            "<?php\nclass UserController { public function index() { return view('admin.users.list'); } }\n",
        ),
        (
            "app/Http/Controllers/LegacyReportController.php",
            "<?php\nclass LegacyReportController { public function show() { return view('reports.legacy'); } }\n",
        ),
        (
            "resources/views/welcome.blade.php",
            r#"@extends('layouts.app')
@section('content')
    @include('admin.users.index')
    <x-forms.input name="q"/>
    <img src="/images/logo.png">
    <link href="https://cdn.example.com/app.css" rel="stylesheet">
@endsection
"#,
        ),
        (
            "resources/views/layouts/app.blade.php",
            r#"<html><head>@vite(['resources/css/app.css', 'resources/js/app.js'])
<link href="/css/app.css" rel="stylesheet"></head><body>@yield('content')</body></html>
"#,
        ),
        (
            "resources/views/dashboard/index.blade.php",
            "@extends('layouts.app')\n<h1>Dashboard</h1>",
        ),
        ("resources/views/admin/users/index.blade.php", "<table></table>"),
        ("resources/views/admin/users/list.blade.php", "<ul></ul>"),
        ("resources/views/reports/legacy.blade.php", "<p>old</p>"),
        ("resources/views/components/forms/input.blade.php", "<input>"),
        ("resources/views/components/forms/select.blade.php", "<select>"),
        ("resources/css/app.css", "body{}"),
        ("resources/js/app.js", ""),
        ("resources/js/unused.js", ""),
        ("public/index.php", "<?php"),
        ("public/.htaccess", ""),
        ("public/robots.txt", ""),
        ("public/css/app.css", ""),
        ("public/css/old.css", ""),
        ("public/images/logo.png", ""),
        ("public/images/it's.png", ""),
        ("public/build/assets/app-abc123.js", ""),
        ("public/storage/avatars/a.png", ""),
        ("vendor/laravel/framework/src/Illuminate/resources/x.js", ""),
        ("node_modules/vite/dist/client.js", ""),
        ("storage/framework/views/compiled.txt", ""),
        ("bootstrap/cache/packages.txt", ""),
        (".git/info/exclude.txt", ""),
    ];
    for (rel, content) in files {
        write_file(&root.join(rel), content);
    }
    root
}

fn run_all(root: &Path) -> UsageGraph {
    let mut graph = UsageGraph::new();
    Tracer::new(root, excluded_prefixes(&[])).run(&mut graph);
    graph
}

// Core Test 1: full project analysis
#[test]
fn test_full_laravel_project() {
    let root = laravel_fixture();
    let result = Deadasset::new(&root).analyze().unwrap();

    assert_eq!(
        result.unused,
        vec![
            "public/css/old.css".to_string(),
            "public/images/it's.png".to_string(),
            "resources/js/unused.js".to_string(),
            "resources/views/components/forms/select.blade.php".to_string(),
            "resources/views/reports/legacy.blade.php".to_string(),
        ]
    );

    fs::remove_dir_all(&root).ok();
}

// Core Test 2: route files are unconditionally used
#[test]
fn test_all_route_files_used() {
    let root = laravel_fixture();
    let mut graph = UsageGraph::new();
    Tracer::new(&root, excluded_prefixes(&[])).run_phase(Phase::Routes, &mut graph);

    for path in list_top_level_files(&root.join("routes")) {
        let rel = relative_path(&root, &path).unwrap();
        assert!(graph.is_used(&rel), "{} should be used", rel);
    }

    fs::remove_dir_all(&root).ok();
}

// Core Test 3: unreferenced controllers stay out of the used set
#[test]
fn test_unreferenced_controller_not_used() {
    let root = laravel_fixture();
    let graph = run_all(&root);

    assert!(graph.is_used("app/Http/Controllers/DashboardController.php"));
    assert!(graph.is_used("app/Http/Controllers/Admin/UserController.php"));
    assert!(!graph.is_used("app/Http/Controllers/LegacyReportController.php"));
    // Its view was never reached either.
    assert!(!graph.is_used("resources/views/reports/legacy.blade.php"));

    fs::remove_dir_all(&root).ok();
}

// Core Test 4: dotted include resolves to nested Blade path
#[test]
fn test_include_resolves_to_nested_view() {
    let root = laravel_fixture();
    let graph = run_all(&root);

    let target = "resources/views/admin/users/index.blade.php";
    assert!(graph.is_candidate(target));
    assert!(graph.is_used(target));
    assert_eq!(graph.referrers(target), vec!["resources/views/welcome.blade.php"]);

    fs::remove_dir_all(&root).ok();
}

// Core Test 5: component tag
#[test]
fn test_component_tag_resolves() {
    let root = laravel_fixture();
    let graph = run_all(&root);

    assert!(graph.is_used("resources/views/components/forms/input.blade.php"));
    assert!(!graph.is_used("resources/views/components/forms/select.blade.php"));

    fs::remove_dir_all(&root).ok();
}

// Core Test 6: local vs external asset references
#[test]
fn test_asset_references() {
    let root = laravel_fixture();
    let graph = run_all(&root);

    assert!(graph.is_used("public/css/app.css"));
    assert!(graph.is_used("public/images/logo.png"));
    assert!(!graph
        .references()
        .keys()
        .any(|k| k.contains("cdn.example.com")));
    assert!(!graph.used().iter().any(|u| u.contains("cdn.example.com")));

    fs::remove_dir_all(&root).ok();
}

// Core Test 7: bundler directive paths are used verbatim
#[test]
fn test_bundler_directive_paths() {
    let root = laravel_fixture();
    let graph = run_all(&root);

    assert!(graph.is_used("resources/css/app.css"));
    assert!(graph.is_used("resources/js/app.js"));
    assert!(!graph.is_used("public/resources/js/app.js"));

    fs::remove_dir_all(&root).ok();
}

// Core Test 8: excluded prefixes never become candidates
#[test]
fn test_excluded_prefixes_never_candidates() {
    let root = laravel_fixture();
    let graph = run_all(&root);

    for candidate in graph.candidates() {
        for prefix in EXCLUDED_PREFIXES {
            assert!(
                !candidate.starts_with(prefix),
                "{} should be excluded by {}",
                candidate,
                prefix
            );
        }
    }
    // Plain PHP files are never candidates.
    assert!(!graph.is_candidate("public/index.php"));
    assert!(!graph.is_candidate("routes/web.php"));

    fs::remove_dir_all(&root).ok();
}

// Core Test 9: two runs agree exactly
#[test]
fn test_idempotent_runs() {
    let root = laravel_fixture();

    let first = run_all(&root);
    let second = run_all(&root);
    assert_eq!(first, second);

    let tracked: BTreeSet<String> = ["public/css/old.css".to_string()].into_iter().collect();
    let unused_a: Vec<&str> = find_unused(&first);
    let unused_b: Vec<&str> = find_unused(&second);
    assert_eq!(
        build_commands(&unused_a, &tracked),
        build_commands(&unused_b, &tracked)
    );

    fs::remove_dir_all(&root).ok();
}

// Core Test 10: removal commands for the fixture
#[test]
fn test_removal_commands_quote_paths() {
    let root = laravel_fixture();
    let result = Deadasset::new(&root).analyze().unwrap();

    let tracked: BTreeSet<String> = ["public/css/old.css".to_string()].into_iter().collect();
    let lines: Vec<String> = build_commands(&result.unused, &tracked)
        .iter()
        .map(ToString::to_string)
        .collect();

    assert_eq!(lines[0], "git rm -f 'public/css/old.css'");
    assert_eq!(lines[1], r#"rm 'public/images/it'"'"'s.png'"#);

    let script = render_script(&root, &build_commands(&result.unused, &tracked), None);
    assert!(script.contains("echo 'Removing 5 unused files...'"));

    fs::remove_dir_all(&root).ok();
}

// Extended Test 1: non-repository falls back to rm
#[test]
fn test_builder_commands_outside_git() {
    let root = laravel_fixture();
    let builder = Deadasset::new(&root);
    let result = builder.analyze().unwrap();

    // The temp fixture is not a git repository (its .git/ holds one stray file).
    for cmd in builder.removal_commands(&result) {
        assert!(!cmd.tracked);
        assert!(cmd.to_string().starts_with("rm '"));
    }

    fs::remove_dir_all(&root).ok();
}

// Extended Test 1b: tracked files get git rm
#[test]
fn test_builder_commands_inside_git() {
    let root = laravel_fixture();
    let git = |args: &[&str]| {
        std::process::Command::new("git")
            .arg("-C")
            .arg(&root)
            .args(args)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    };
    if !git(&["init", "-q"]) {
        eprintln!("git unavailable, skipping");
        fs::remove_dir_all(&root).ok();
        return;
    }
    assert!(git(&["add", "public/css/old.css"]));

    let builder = Deadasset::new(&root);
    let result = builder.analyze().unwrap();
    let lines: Vec<String> = builder
        .removal_commands(&result)
        .iter()
        .map(ToString::to_string)
        .collect();

    assert_eq!(lines[0], "git rm -f 'public/css/old.css'");
    assert_eq!(lines[1], r#"rm 'public/images/it'"'"'s.png'"#);

    fs::remove_dir_all(&root).ok();
}

// Extended Test 2: missing directories are empty phases
#[test]
fn test_missing_directories() {
    let root = setup_temp_project();
    write_file(&root.join("public/app.js"), "");

    let result = Deadasset::new(&root).analyze().unwrap();
    assert_eq!(result.unused, vec!["public/app.js".to_string()]);
    assert!(result.phases.iter().all(|p| p.failed == 0));

    fs::remove_dir_all(&root).ok();
}

// Extended Test 3: a substring hit keeps a controller alive
#[test]
fn test_substring_false_positive_is_preserved() {
    let root = setup_temp_project();
    write_file(
        &root.join("routes/web.php"),
        "<?php\nRoute::get('/x', [AccountController::class, 'show']);\n",
    );
    write_file(&root.join("app/Http/Controllers/AccountController.php"), "<?php\n");
    // "web" is a substring of the referencing file "routes/web.php".
    write_file(&root.join("app/Http/Controllers/Admin/web.php"), "<?php\n");

    let graph = run_all(&root);
    assert!(graph.is_used("app/Http/Controllers/Admin/web.php"));

    fs::remove_dir_all(&root).ok();
}
