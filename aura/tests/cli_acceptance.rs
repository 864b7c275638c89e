use aura_core::{Database, EntryStore, KeyedEntryStore};
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

struct CliTestEnv {
    _temp_dir: TempDir,
    home: PathBuf,
    xdg_data: PathBuf,
    xdg_config: PathBuf,
    xdg_state: PathBuf,
}

impl CliTestEnv {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let base = temp_dir.path().to_path_buf();
        let home = base.join("home");
        let xdg_data = base.join("xdg-data");
        let xdg_config = base.join("xdg-config");
        let xdg_state = base.join("xdg-state");

        fs::create_dir_all(&home).expect("failed to create HOME");
        fs::create_dir_all(&xdg_data).expect("failed to create XDG_DATA_HOME");
        fs::create_dir_all(&xdg_config).expect("failed to create XDG_CONFIG_HOME");
        fs::create_dir_all(&xdg_state).expect("failed to create XDG_STATE_HOME");

        Self {
            _temp_dir: temp_dir,
            home,
            xdg_data,
            xdg_config,
            xdg_state,
        }
    }

    fn db_path(&self) -> PathBuf {
        self.xdg_data.join("aura/data.db")
    }

    fn write_config(&self, contents: &str) {
        let dir = self.xdg_config.join("aura");
        fs::create_dir_all(&dir).expect("failed to create config dir");
        fs::write(dir.join("config.toml"), contents).expect("failed to write config");
    }

    /// Check in `moods` one day apart, oldest first, ending 2024-03-31.
    fn seed_daily(&self, moods: &[(i64, i64, &str)]) {
        let n = moods.len();
        for (i, (mood, energy, tags)) in moods.iter().enumerate() {
            let day = 31 - (n - 1 - i);
            let at = format!("2024-03-{:02}T09:00:00+00:00", day);
            let (mood, energy) = (mood.to_string(), energy.to_string());
            let args = [
                "checkin", "--mood", &mood, "--energy", &energy, "--tags", tags, "--at", &at,
            ];
            let output = run_aura(self, &args);
            assert_success(&args, &output);
        }
    }
}

fn run_aura(env: &CliTestEnv, args: &[&str]) -> Output {
    let bin_path = PathBuf::from(assert_cmd::cargo::cargo_bin!("aura"));

    Command::new(bin_path)
        .args(args)
        .env("HOME", &env.home)
        .env("XDG_DATA_HOME", &env.xdg_data)
        .env("XDG_CONFIG_HOME", &env.xdg_config)
        .env("XDG_STATE_HOME", &env.xdg_state)
        .output()
        .unwrap_or_else(|e| panic!("failed to execute aura: {e}"))
}

fn assert_success(args: &[&str], output: &Output) {
    if output.status.success() {
        return;
    }

    let rendered_args = args
        .iter()
        .map(|arg| OsString::from(arg).to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    panic!(
        "aura {rendered_args} failed\nstatus: {}\nstdout:\n{}\nstderr:\n{}",
        output.status, stdout, stderr
    );
}

fn stdout_json(args: &[&str], output: &Output) -> serde_json::Value {
    assert_success(args, output);
    serde_json::from_slice(&output.stdout)
        .unwrap_or_else(|e| panic!("aura {} did not print JSON: {e}", args.join(" ")))
}

const TWO_WEEKS: [(i64, i64, &str); 14] = [
    (4, 3, "work"),
    (8, 7, "walk, friends"),
    (5, 4, "work, deadline"),
    (7, 8, "exercise"),
    (3, 3, "work, poor-sleep"),
    (8, 8, "friends"),
    (6, 6, ""),
    (4, 4, "work"),
    (9, 8, "walk, friends"),
    (5, 5, "work"),
    (7, 7, "exercise"),
    (4, 3, "work, stress"),
    (8, 7, "friends, social"),
    (7, 6, "walk"),
];

#[test]
fn checkin_persists_entries_newest_first() {
    let env = CliTestEnv::new();
    env.seed_daily(&[(4, 5, "rain"), (7, 6, "walk, friends")]);

    let db_path = env.db_path();
    assert!(
        db_path.exists(),
        "database file should exist at {}",
        db_path.display()
    );

    let db = Database::open(&db_path).expect("failed to open db");
    db.migrate().expect("failed to migrate db");
    let entries = KeyedEntryStore::new(&db, "aura-entries").load();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].mood, 7);
    assert_eq!(entries[0].tags, vec!["walk", "friends"]);

    let args = ["list", "--format", "json"];
    let listed = stdout_json(&args, &run_aura(&env, &args));
    assert_eq!(listed.as_array().map(Vec::len), Some(2));
    assert_eq!(listed[0]["date"], "2024-03-31T09:00:00Z");
}

#[test]
fn checkin_rejects_out_of_range_mood() {
    let env = CliTestEnv::new();
    let output = run_aura(&env, &["checkin", "--mood", "11", "--energy", "5"]);
    assert!(!output.status.success());
    assert!(!env.db_path().exists() || {
        let db = Database::open(&env.db_path()).expect("failed to open db");
        db.migrate().expect("failed to migrate db");
        KeyedEntryStore::new(&db, "aura-entries").load().is_empty()
    });
}

#[test]
fn components_below_threshold_print_notice() {
    let env = CliTestEnv::new();
    env.seed_daily(&[(6, 6, ""), (5, 5, "")]);

    let output = run_aura(&env, &["forecast"]);
    assert_success(&["forecast"], &output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Need at least 7 entries for forecasting (have 2)."),
        "unexpected output:\n{stdout}"
    );

    let args = ["momentum", "--format", "json"];
    let json = stdout_json(&args, &run_aura(&env, &args));
    assert_eq!(json["available"], false);
    assert_eq!(json["required"], 3);
}

#[test]
fn seeded_forecast_is_reproducible_and_in_range() {
    let env = CliTestEnv::new();
    env.seed_daily(&TWO_WEEKS);

    let args = [
        "forecast", "--seed", "7", "--days", "10", "--as-of", "2024-03-31", "--format", "json",
    ];
    let first = run_aura(&env, &args);
    let second = run_aura(&env, &args);
    assert_success(&args, &first);
    assert_eq!(first.stdout, second.stdout);

    let models = stdout_json(&args, &first);
    for model in models.as_array().expect("forecast output should be an array") {
        let predictions = model["predictions"].as_array().unwrap();
        assert_eq!(predictions.len(), 10);
        assert_eq!(predictions[0]["date"], "2024-04-01");
        for day in predictions {
            let mood = day["mood"].as_f64().unwrap();
            let energy = day["energy"].as_f64().unwrap();
            assert!((1.0..=10.0).contains(&mood));
            assert!((1.0..=10.0).contains(&energy));
        }
    }
}

#[test]
fn insights_runs_every_analyzer() {
    let env = CliTestEnv::new();
    env.seed_daily(&TWO_WEEKS);

    let args = ["insights", "--seed", "1", "--as-of", "2024-03-31", "--format", "json"];
    let json = stdout_json(&args, &run_aura(&env, &args));
    assert_eq!(json["entries"], 14);

    let results = json["results"].as_array().unwrap();
    assert_eq!(results.len(), 8);
    assert!(results.iter().all(|r| r["status"] == "success"));

    let outlook = results
        .iter()
        .find(|r| r["analyzer"] == "core.outlook")
        .unwrap();
    assert_eq!(outlook["insights_produced"], 7);
    assert_eq!(outlook["insights"][0]["kind"], "outlook");

    let text = run_aura(&env, &["insights", "--seed", "1"]);
    assert_success(&["insights"], &text);
    assert!(String::from_utf8_lossy(&text.stdout).contains("[+] core.summary"));
}

#[test]
fn config_controls_outlook_length_and_tag_count() {
    let env = CliTestEnv::new();
    env.write_config("[analytics]\noutlook_days = 3\ntop_tags = 1\n");
    env.seed_daily(&TWO_WEEKS);

    let args = ["outlook", "--as-of", "2024-03-31", "--format", "json"];
    let days = stdout_json(&args, &run_aura(&env, &args));
    assert_eq!(days.as_array().map(Vec::len), Some(3));

    let args = ["correlations", "--format", "json"];
    let matrix = stdout_json(&args, &run_aura(&env, &args));
    assert_eq!(matrix["variables"], serde_json::json!(["mood", "energy", "work"]));
}

#[test]
fn delete_by_unique_prefix() {
    let env = CliTestEnv::new();
    env.seed_daily(&[(5, 5, ""), (6, 6, "")]);

    let args = ["list", "--format", "json"];
    let listed = stdout_json(&args, &run_aura(&env, &args));
    let id = listed[0]["id"].as_str().unwrap().to_string();

    let output = run_aura(&env, &["delete", &id[..13]]);
    assert_success(&["delete"], &output);
    assert!(String::from_utf8_lossy(&output.stdout).contains(&id));

    let listed = stdout_json(&args, &run_aura(&env, &args));
    assert_eq!(listed.as_array().map(Vec::len), Some(1));

    let missing = run_aura(&env, &["delete", "not-an-id"]);
    assert!(!missing.status.success());
}

#[test]
fn report_requires_minimum_entries() {
    let env = CliTestEnv::new();
    env.write_config("[report]\nserver_url = \"http://127.0.0.1:9\"\ntimeout_secs = 2\n");
    env.seed_daily(&[(5, 5, "")]);

    let output = run_aura(&env, &["report"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("need at least 3 entries, have 1"),
        "unexpected stderr:\n{stderr}"
    );
}

#[test]
fn interventions_follow_a_mood_drop() {
    let env = CliTestEnv::new();
    let mut history = vec![(8, 8, ""); 6];
    history.push((3, 3, ""));
    env.seed_daily(&history);

    let args = ["interventions", "--format", "json"];
    let suggestions = stdout_json(&args, &run_aura(&env, &args));
    let suggestions = suggestions.as_array().expect("interventions should be an array");
    assert_eq!(suggestions.len(), 3);
    assert_eq!(suggestions[0]["timing"], "immediate");
    assert_eq!(suggestions[0]["text"], "Take 5 deep breaths");

    let steady = CliTestEnv::new();
    steady.seed_daily(&[(6, 6, ""), (6, 6, "")]);
    let output = run_aura(&steady, &["interventions"]);
    assert_success(&["interventions"], &output);
    assert!(String::from_utf8_lossy(&output.stdout).contains("in line with your recent entries"));
}
