//! Member lists of the `BoxScoreV3` sequences
//!
//! Used as the header when the API returns an empty array for a member.
//! Non-empty arrays take their header from the first element.

/// `Quarters` elements
pub const QUARTER_FIELDS: &[&str] = &[
    "QuarterID",
    "ScoreID",
    "Number",
    "Name",
    "AwayScore",
    "HomeScore",
    "Updated",
    "Created",
];

/// `TeamGames` elements
pub const TEAM_GAME_FIELDS: &[&str] = &[
    "GameKey",
    "Date",
    "SeasonType",
    "Season",
    "Week",
    "Team",
    "Opponent",
    "HomeOrAway",
    "Score",
    "OpponentScore",
    "TotalScore",
    "Stadium",
    "PlayingSurface",
    "Temperature",
    "Humidity",
    "WindSpeed",
    "OverUnder",
    "PointSpread",
    "ScoreQuarter1",
    "ScoreQuarter2",
    "ScoreQuarter3",
    "ScoreQuarter4",
    "ScoreOvertime",
    "TimeOfPossession",
    "FirstDowns",
    "OffensivePlays",
    "OffensiveYards",
    "PassingYards",
    "RushingYards",
    "Touchdowns",
    "Giveaways",
    "Takeaways",
    "TeamGameID",
    "TeamID",
    "OpponentID",
    "GlobalGameID",
    "ScoreID",
];

/// `PlayerGames` elements
pub const PLAYER_GAME_FIELDS: &[&str] = &[
    "GameKey",
    "PlayerID",
    "SeasonType",
    "Season",
    "GameDate",
    "Week",
    "Team",
    "Opponent",
    "HomeOrAway",
    "Number",
    "Name",
    "Position",
    "PositionCategory",
    "Activated",
    "Played",
    "Started",
    "PassingAttempts",
    "PassingCompletions",
    "PassingYards",
    "PassingTouchdowns",
    "PassingInterceptions",
    "RushingAttempts",
    "RushingYards",
    "RushingTouchdowns",
    "Receptions",
    "ReceivingTargets",
    "ReceivingYards",
    "ReceivingTouchdowns",
    "Fumbles",
    "FumblesLost",
    "FieldGoalsMade",
    "FieldGoalsAttempted",
    "ExtraPointsMade",
    "TwoPointConversionPasses",
    "TwoPointConversionRuns",
    "TwoPointConversionReceptions",
    "FantasyPoints",
    "FantasyPointsPPR",
    "PlayerGameID",
    "GlobalGameID",
    "TeamID",
    "OpponentID",
    "ScoreID",
];

/// `FantasyDefenseGames` elements
pub const FANTASY_DEFENSE_GAME_FIELDS: &[&str] = &[
    "GameKey",
    "SeasonType",
    "Season",
    "Week",
    "Date",
    "Team",
    "Opponent",
    "PointsAllowed",
    "TouchdownsScored",
    "SoloTackles",
    "AssistedTackles",
    "Sacks",
    "SackYards",
    "PassesDefended",
    "FumblesForced",
    "FumblesRecovered",
    "FumbleReturnYards",
    "FumbleReturnTouchdowns",
    "Interceptions",
    "InterceptionReturnYards",
    "InterceptionReturnTouchdowns",
    "BlockedKicks",
    "Safeties",
    "PuntReturns",
    "PuntReturnYards",
    "PuntReturnTouchdowns",
    "KickReturns",
    "KickReturnYards",
    "KickReturnTouchdowns",
    "TwoPointConversionReturns",
    "FantasyPointsAllowed",
    "FantasyPoints",
    "IsGameOver",
    "PlayerID",
    "GlobalGameID",
    "TeamID",
    "OpponentID",
    "ScoreID",
];

/// `ScoringPlays` elements
pub const SCORING_PLAY_FIELDS: &[&str] = &[
    "GameKey",
    "SeasonType",
    "ScoringPlayID",
    "Season",
    "Week",
    "AwayTeam",
    "HomeTeam",
    "Date",
    "Sequence",
    "Team",
    "Quarter",
    "TimeRemaining",
    "PlayDescription",
    "AwayScore",
    "HomeScore",
    "ScoreID",
];

/// `ScoringDetails` elements
pub const SCORING_DETAIL_FIELDS: &[&str] = &[
    "GameKey",
    "SeasonType",
    "PlayerID",
    "Team",
    "Season",
    "Week",
    "ScoringType",
    "Length",
    "ScoringDetailID",
    "PlayerGameID",
    "ScoringPlayID",
    "IsConversion",
];
