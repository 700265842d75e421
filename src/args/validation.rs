use serde_json::Value;
use std::{fs, path::PathBuf};

fn read_json_file(file: &str) -> Result<Value, String> {
    let path = PathBuf::from(file);
    if !path.is_file() || fs::metadata(&path).is_err() {
        return Err(format!("The json file '{file}' is not readable."));
    }
    let contents =
        fs::read_to_string(&path).map_err(|e| format!("The json file '{file}' is not readable: {e}"))?;
    serde_json::from_str(&contents).map_err(|e| format!("The file '{file}' is not valid json: {e}"))
}

/// # Errors
///
/// Will return `Err` if the file is not readable, is not json, or is not a
/// leaderboard object
pub fn check_readable_leaderboard(file: &str) -> Result<Value, String> {
    let json = read_json_file(file)?;
    validate_leaderboard_format(&json)?;
    Ok(json)
}

/// # Errors
///
/// Will return `Err` if the file is not readable, is not json, or is not a
/// list of teams
pub fn check_readable_teams(file: &str) -> Result<Value, String> {
    let json = read_json_file(file)?;
    validate_teams_format(&json)?;
    Ok(json)
}

/// Validate the leaderboard file format
/// format we expect is this:
/// { "status": "In Progress", "roundId": <int>, "leaderboardRows": [
/// { "firstName": "..", "lastName": "..", "status": "active", "rounds": [{"roundId": .., "strokes": .., "scoreToPar": ".."}], ... }
/// ]}
///
/// # Errors
///
/// Will return `Err` if the json is not in the correct format
pub fn validate_leaderboard_format(json: &Value) -> Result<(), String> {
    let Some(doc) = json.as_object() else {
        return Err("The leaderboard is not in the correct format. Expected an object.".to_string());
    };
    let Some(rows) = doc.get("leaderboardRows").and_then(Value::as_array) else {
        return Err(
            "The leaderboard is not in the correct format. Expected a leaderboardRows array."
                .to_string(),
        );
    };
    for (idx, row) in rows.iter().enumerate() {
        if !row.is_object() {
            return Err(format!("leaderboardRows[{idx}] is not an object."));
        }
        if let Some(rounds) = row.get("rounds") {
            if !rounds.is_array() {
                return Err(format!("leaderboardRows[{idx}].rounds is not an array."));
            }
        }
    }
    Ok(())
}

/// Validate the teams file format
/// format we expect is this:
/// [{ "teamName": "..", "golferNames": ["Firstname Lastname", ...], "participatesInAnnual": <bool> }]
///
/// # Errors
///
/// Will return `Err` if the json is not in the correct format
pub fn validate_teams_format(json: &Value) -> Result<(), String> {
    let Some(teams) = json.as_array() else {
        return Err("The teams file is not in the correct format. Expected an array.".to_string());
    };
    let expected_keys = ["teamName", "golferNames", "participatesInAnnual"];
    for (idx, team) in teams.iter().enumerate() {
        let Some(team) = team.as_object() else {
            return Err(format!("teams[{idx}] is not an object."));
        };
        if let Some(key) = team.keys().find(|k| !expected_keys.contains(&k.as_str())) {
            return Err(format!(
                "teams[{idx}] has unexpected key '{key}'. Expected keys: {expected_keys:?}"
            ));
        }
        if !team.get("teamName").is_some_and(Value::is_string) {
            return Err(format!("teams[{idx}].teamName is not a string."));
        }
        let names_ok = team
            .get("golferNames")
            .and_then(Value::as_array)
            .is_some_and(|names| names.iter().all(Value::is_string));
        if !names_ok {
            return Err(format!("teams[{idx}].golferNames is not an array of strings."));
        }
        if team
            .get("participatesInAnnual")
            .is_some_and(|v| !v.is_boolean())
        {
            return Err(format!("teams[{idx}].participatesInAnnual is not a boolean."));
        }
    }
    Ok(())
}
