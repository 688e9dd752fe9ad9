//! Merging custom views into the admin navigation.

use admin_pages_core::apps::AppRegistry;
use admin_pages_core::{AdminError, AdminResult};

use crate::app_list::{sort_app_list, AppEntry, ModelEntry};
use crate::app_settings::CUSTOM_ADMIN_PAGES_NAME;
use crate::registry::RegisteredView;

/// Inputs of [`merge_custom_views`] besides the lists themselves.
#[derive(Debug, Clone, Copy)]
pub struct MergeOptions<'a> {
    /// Installed apps, used to name groups synthesized for custom views.
    pub apps: &'a AppRegistry,
    /// Views with this label go to the "Custom Admin Pages" group.
    pub default_app_label: &'a str,
    /// Absolute admin index URL, e.g. `"/admin/"`.
    pub index_url: &'a str,
}

/// Merges the custom views a user may see into the native navigation.
///
/// `views` must already be filtered to what the user may see, and each is
/// turned into its row by `build_entry`. For each view:
///
/// 1. With the default label, the row goes to the "Custom Admin Pages" group.
/// 2. Otherwise it joins the group whose label matches, ignoring case, and that
///    group's rows are re-sorted by name.
/// 3. Otherwise, if the label is an installed app, a group is created for it.
///
/// The "Custom Admin Pages" group is appended when it has rows, keeping them
/// in registration order, and the groups are sorted by name.
///
/// # Errors
///
/// Returns [`AdminError::ImproperlyConfigured`] for a view whose label is not
/// an installed app, or whatever `build_entry` fails with.
pub fn merge_custom_views<'v, I, F>(
    mut app_list: Vec<AppEntry>,
    views: I,
    options: MergeOptions<'_>,
    mut build_entry: F,
) -> AdminResult<Vec<AppEntry>>
where
    I: IntoIterator<Item = &'v RegisteredView>,
    F: FnMut(&RegisteredView) -> AdminResult<ModelEntry>,
{
    let mut custom_pages: Vec<ModelEntry> = Vec::new();

    for view in views {
        let entry = build_entry(view)?;
        let label = view.app_label();

        if label == options.default_app_label {
            custom_pages.push(entry);
            continue;
        }

        if let Some(group) = app_list
            .iter_mut()
            .find(|g| g.app_label.eq_ignore_ascii_case(label))
        {
            group.models.push(entry);
            group.sort_models();
            continue;
        }

        let Some(config) = options.apps.get_app_config(label) else {
            return Err(AdminError::ImproperlyConfigured(format!(
                "Custom admin view '{}' ({}) has app_label '{label}', which is not an installed app.",
                view.view_name(),
                view.view_id()
            )));
        };
        let mut group = AppEntry::new(
            config.verbose_name(),
            label,
            format!("{}{label}/", options.index_url),
        );
        group.models.push(entry);
        app_list.push(group);
    }

    if !custom_pages.is_empty() {
        let mut group = AppEntry::new(
            CUSTOM_ADMIN_PAGES_NAME,
            options.default_app_label,
            format!("{}{}/", options.index_url, options.default_app_label),
        );
        group.models = custom_pages;
        app_list.push(group);
    }

    sort_app_list(&mut app_list);
    Ok(app_list)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::views::{AdminBaseView, View};
    use admin_pages_core::apps::SimpleAppConfig;

    macro_rules! admin_view {
        ($ty:ident, $name:expr, $label:expr) => {
            struct $ty;
            impl View for $ty {}
            impl AdminBaseView for $ty {
                fn view_name(&self) -> Option<&str> {
                    Some($name)
                }
                fn app_label(&self) -> Option<&str> {
                    $label
                }
            }
        };
    }

    admin_view!(ZetaPage, "Zeta Page", None);
    admin_view!(AlphaPage, "Alpha Page", None);
    admin_view!(BlogStats, "Blog Stats", Some("blog"));
    admin_view!(AnotherPage, "Another Page", Some("another_test_app"));
    admin_view!(AnotherExtra, "Aardvark", Some("another_test_app"));

    fn make_apps() -> AppRegistry {
        let mut apps = AppRegistry::new();
        for name in [
            "admin_pages.custom_admin_pages",
            "test_proj.blog",
            "test_proj.another_test_app",
        ] {
            apps.register(Box::new(SimpleAppConfig::new(name))).unwrap();
        }
        apps
    }

    fn resolve(view: Arc<dyn AdminBaseView>, apps: &AppRegistry) -> RegisteredView {
        RegisteredView::resolve(view, apps, "custom_admin_pages").unwrap()
    }

    fn entry_for(view: &RegisteredView) -> AdminResult<ModelEntry> {
        Ok(ModelEntry::custom_view(
            view.view_name(),
            format!("/admin/{}", view.url_route()),
        ))
    }

    fn native_blog() -> AppEntry {
        let mut blog = AppEntry::new("Blog", "Blog", "/admin/blog/");
        blog.models.push(ModelEntry::custom_view("Posts", "/admin/blog/post/"));
        blog
    }

    fn options(apps: &AppRegistry) -> MergeOptions<'_> {
        MergeOptions {
            apps,
            default_app_label: "custom_admin_pages",
            index_url: "/admin/",
        }
    }

    #[test]
    fn test_default_label_goes_to_custom_group() {
        let apps = make_apps();
        let views = vec![
            resolve(Arc::new(ZetaPage), &apps),
            resolve(Arc::new(AlphaPage), &apps),
        ];
        let merged = merge_custom_views(Vec::new(), &views, options(&apps), entry_for).unwrap();

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].name, "Custom Admin Pages");
        assert_eq!(merged[0].app_label, "custom_admin_pages");
        assert_eq!(merged[0].app_url, "/admin/custom_admin_pages/");
        let names: Vec<&str> = merged[0].models.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Zeta Page", "Alpha Page"]);
    }

    #[test]
    fn test_matching_native_group_case_insensitive() {
        let apps = make_apps();
        let views = vec![resolve(Arc::new(BlogStats), &apps)];
        let merged =
            merge_custom_views(vec![native_blog()], &views, options(&apps), entry_for).unwrap();

        assert_eq!(merged.len(), 1);
        let names: Vec<&str> = merged[0].models.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Blog Stats", "Posts"]);
    }

    #[test]
    fn test_group_synthesized_for_installed_app() {
        let apps = make_apps();
        let views = vec![
            resolve(Arc::new(AnotherPage), &apps),
            resolve(Arc::new(AnotherExtra), &apps),
            resolve(Arc::new(AlphaPage), &apps),
        ];
        let merged =
            merge_custom_views(vec![native_blog()], &views, options(&apps), entry_for).unwrap();

        let groups: Vec<&str> = merged.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(groups, vec!["Another Test App", "Blog", "Custom Admin Pages"]);

        let another = &merged[0];
        assert_eq!(another.app_label, "another_test_app");
        assert_eq!(another.app_url, "/admin/another_test_app/");
        let names: Vec<&str> = another.models.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Aardvark", "Another Page"]);
    }

    #[test]
    fn test_uninstalled_label_fails() {
        let apps = make_apps();
        let views = vec![resolve(Arc::new(AnotherPage), &apps)];

        let mut fewer = AppRegistry::new();
        fewer
            .register(Box::new(SimpleAppConfig::new("admin_pages.custom_admin_pages")))
            .unwrap();

        let err = merge_custom_views(Vec::new(), &views, options(&fewer), entry_for).unwrap_err();
        assert!(matches!(err, AdminError::ImproperlyConfigured(_)));
        let msg = err.to_string();
        assert!(msg.contains("Another Page"));
        assert!(msg.contains("another_test_app"));
    }

    #[test]
    fn test_no_views_leaves_list_sorted() {
        let apps = make_apps();
        let native = vec![
            AppEntry::new("Zoo", "zoo", "/admin/zoo/"),
            AppEntry::new("Ant", "ant", "/admin/ant/"),
        ];
        let merged = merge_custom_views(native, &[], options(&apps), entry_for).unwrap();
        let groups: Vec<&str> = merged.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(groups, vec!["Ant", "Zoo"]);
    }

    #[test]
    fn test_build_entry_error_propagates() {
        let apps = make_apps();
        let views = vec![resolve(Arc::new(AlphaPage), &apps)];
        let err = merge_custom_views(Vec::new(), &views, options(&apps), |_| {
            Err(AdminError::ImportError("route missing".to_string()))
        })
        .unwrap_err();
        assert!(matches!(err, AdminError::ImportError(_)));
    }
}
