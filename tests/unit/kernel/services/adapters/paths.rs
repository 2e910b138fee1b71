use super::*;

#[test]
fn override_wins_over_home() {
    let dir = resolve_base_dir(Some("/srv/dojo".into()), Some("/home/me".into()));
    assert_eq!(dir, Some(PathBuf::from("/srv/dojo")));
}

#[test]
fn defaults_below_home() {
    let dir = resolve_base_dir(None, Some("/home/me".into()));
    assert_eq!(dir, Some(PathBuf::from("/home/me/.k8s-dojo")));

    let dir = resolve_base_dir(Some(OsString::new()), Some("/home/me".into()));
    assert_eq!(dir, Some(PathBuf::from("/home/me/.k8s-dojo")));
}

#[test]
fn no_home_means_no_base_dir() {
    assert_eq!(resolve_base_dir(None, None), None);
}
