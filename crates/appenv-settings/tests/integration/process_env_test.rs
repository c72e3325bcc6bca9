//! Tests that read the real process environment. Serialised so they never race each other.

use appenv_core::config::FromEnv;
use appenv_settings::schema::Profile;
use appenv_settings::{Settings, startup};
use appenv_testing::EnvFixture;
use serial_test::serial;

fn export(env: &EnvFixture) {
    for (key, value) in env.iter() {
        // SAFETY: every test touching the process environment is #[serial].
        unsafe { std::env::set_var(key, value) };
    }
}

fn clear(env: &EnvFixture) {
    for (key, _) in env.iter() {
        // SAFETY: see `export`.
        unsafe { std::env::remove_var(key) };
    }
}

#[test]
#[serial]
fn should_load_full_settings_from_process_env() {
    let env = EnvFixture::full();
    export(&env);

    let result = Settings::from_env();
    clear(&env);

    let settings = result.unwrap();
    assert_eq!(settings.profile(), Profile::Full);
    assert_eq!(settings.email().unwrap().port, 587);
}

#[test]
#[serial]
fn should_keep_first_startup_load_for_process_lifetime() {
    let env = EnvFixture::minimal().set("DEBUG", "true");
    export(&env);

    let first = startup::init(Profile::Minimal).unwrap();
    assert!(first.framework().debug);

    // SAFETY: see `export`.
    unsafe { std::env::set_var("DEBUG", "false") };
    let second = startup::init(Profile::Minimal).unwrap();
    clear(&env);

    assert!(std::ptr::eq(first, second));
    assert!(second.framework().debug);
    assert!(std::ptr::eq(startup::get().unwrap(), first));
}
