mod edge_cases;
mod mint_flows;
mod persistence;
