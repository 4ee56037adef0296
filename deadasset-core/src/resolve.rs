//! Raw reference resolution to project-relative paths.
//!
//! Laravel naming conventions drive every rule:
//! - dotted view names map to nested Blade files under `resources/views/`
//! - `<x-...>` components live under `resources/views/components/`
//! - `App\...` classes live under `app/` (PSR-4)
//! - controllers bound in routes live under `app/Http/Controllers/`
//! - static assets are served from `public/`
//!
//! All returned paths use `/` separators regardless of platform.

use crate::extract::RawReference;

pub const VIEWS_DIR: &str = "resources/views";
pub const COMPONENTS_DIR: &str = "resources/views/components";
pub const CONTROLLERS_DIR: &str = "app/Http/Controllers";
pub const ROUTES_DIR: &str = "routes";
pub const PUBLIC_DIR: &str = "public";
pub const BLADE_SUFFIX: &str = ".blade.php";

/// Root namespace mapped onto `app/`.
const APP_NAMESPACE: &str = "App\\";
const APP_DIR: &str = "app";

/// Outcome of resolving one raw reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A project file: marked used and recorded as an edge target
    File(String),
    /// A route path: recorded as an edge target only
    Route(String),
    /// Nothing to resolve to (e.g. a vendor class import)
    Unresolved(String),
}

/// Resolve a raw reference into its normalized target.
pub fn resolve(raw: &RawReference) -> Resolution {
    match raw {
        RawReference::Class(class) => match class_path(class) {
            Some(path) => Resolution::File(path),
            None => Resolution::Unresolved(class.clone()),
        },
        RawReference::View(name) => Resolution::File(view_path(name)),
        RawReference::Controller { class, .. } => Resolution::File(controller_path(class)),
        RawReference::Include(path) | RawReference::Bundle(path) => Resolution::File(path.clone()),
        RawReference::Component(name) => Resolution::File(component_path(name)),
        RawReference::Asset(value) => Resolution::File(asset_path(value)),
        RawReference::RoutePath(path) => Resolution::Route(path.clone()),
    }
}

fn dotted_to_nested(root: &str, name: &str) -> String {
    format!("{}/{}{}", root, name.replace('.', "/"), BLADE_SUFFIX)
}

/// `admin.users.index` → `resources/views/admin/users/index.blade.php`
pub fn view_path(name: &str) -> String {
    dotted_to_nested(VIEWS_DIR, name)
}

/// `forms.input` → `resources/views/components/forms/input.blade.php`
pub fn component_path(name: &str) -> String {
    dotted_to_nested(COMPONENTS_DIR, name)
}

fn namespace_to_path(class: &str) -> String {
    class
        .split('\\')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// `App\Models\User` → `app/Models/User.php`.
///
/// Returns `None` for classes outside the application namespace.
pub fn class_path(class: &str) -> Option<String> {
    let rest = class.trim_start_matches('\\').strip_prefix(APP_NAMESPACE)?;
    let nested = namespace_to_path(rest);
    if nested.is_empty() {
        return None;
    }
    Some(format!("{}/{}.php", APP_DIR, nested))
}

/// `Admin\UserController` → `app/Http/Controllers/Admin/UserController.php`.
///
/// A fully-qualified `App\Http\Controllers\...` token lands on the same file.
pub fn controller_path(class: &str) -> String {
    let trimmed = class.trim_start_matches('\\');
    let relative = trimmed
        .strip_prefix("App\\Http\\Controllers\\")
        .unwrap_or(trimmed);
    format!("{}/{}.php", CONTROLLERS_DIR, namespace_to_path(relative))
}

/// `/css/app.css` → `public/css/app.css`
pub fn asset_path(value: &str) -> String {
    format!("{}/{}", PUBLIC_DIR, value.trim_start_matches('/'))
}

/// Dotted view name for a Blade file path relative to the project root.
///
/// `resources/views/admin/users/index.blade.php` → `admin.users.index`.
/// Returns `None` when the path is not a Blade file under the views directory.
pub fn view_name_from_path(relative: &str) -> Option<String> {
    let inside = relative.strip_prefix(VIEWS_DIR)?.strip_prefix('/')?;
    let stem = inside.strip_suffix(BLADE_SUFFIX)?;
    Some(stem.replace('/', "."))
}
