use std::path::PathBuf;

use serial_test::serial;
use triton::config::{CONFIG_ENV, Config};

fn clear_env() {
    unsafe {
        std::env::remove_var("LISTEN");
        std::env::remove_var("DOC_ROOT");
        std::env::remove_var(CONFIG_ENV);
    }
}

#[test]
#[serial]
fn test_config_defaults() {
    clear_env();
    let cfg = Config::load().unwrap();

    assert_eq!(cfg.server.listen_addr, "127.0.0.1:8080");
    assert_eq!(cfg.server.read_timeout_secs, 5);
    assert_eq!(cfg.static_files.doc_root, PathBuf::from("."));
}

#[test]
#[serial]
fn test_config_env_overrides() {
    clear_env();
    unsafe {
        std::env::set_var("LISTEN", "0.0.0.0:3000");
        std::env::set_var("DOC_ROOT", "/srv/www");
    }
    let cfg = Config::load().unwrap();
    clear_env();

    assert_eq!(cfg.server.listen_addr, "0.0.0.0:3000");
    assert_eq!(cfg.static_files.doc_root, PathBuf::from("/srv/www"));
}

#[test]
#[serial]
fn test_config_from_file_named_by_env() {
    clear_env();
    let path = std::env::temp_dir().join(format!("triton-config-{}.yaml", std::process::id()));
    std::fs::write(
        &path,
        "server:\n  listen_addr: \"127.0.0.1:9000\"\n  read_timeout_secs: 2\nstatic_files:\n  doc_root: ./public\n",
    )
    .unwrap();

    unsafe {
        std::env::set_var(CONFIG_ENV, &path);
        std::env::set_var("LISTEN", "127.0.0.1:9001");
    }
    let cfg = Config::load().unwrap();
    clear_env();
    std::fs::remove_file(&path).unwrap();

    // LISTEN wins over the file
    assert_eq!(cfg.server.listen_addr, "127.0.0.1:9001");
    assert_eq!(cfg.server.read_timeout_secs, 2);
    assert_eq!(cfg.static_files.doc_root, PathBuf::from("./public"));
}

#[test]
#[serial]
fn test_config_missing_file_is_an_error() {
    clear_env();
    unsafe {
        std::env::set_var(CONFIG_ENV, "/nonexistent/triton.yaml");
    }
    let result = Config::load();
    clear_env();

    assert!(result.is_err());
}

#[test]
fn test_config_partial_yaml_uses_defaults() {
    let cfg = Config::from_yaml("static_files:\n  doc_root: /var/www\n").unwrap();

    assert_eq!(cfg.server.listen_addr, "127.0.0.1:8080");
    assert_eq!(cfg.static_files.doc_root, PathBuf::from("/var/www"));
}

#[test]
fn test_config_invalid_yaml() {
    assert!(Config::from_yaml("server: [not, a, map]").is_err());
}

#[test]
fn test_config_read_timeout() {
    let cfg = Config::from_yaml("server:\n  read_timeout_secs: 7\n").unwrap();

    assert_eq!(cfg.server.read_timeout(), std::time::Duration::from_secs(7));
}

#[test]
fn test_config_clone() {
    let cfg1 = Config::default();
    let cfg2 = cfg1.clone();
    assert_eq!(cfg1.server.listen_addr, cfg2.server.listen_addr);
}
