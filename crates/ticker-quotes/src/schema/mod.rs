pub mod alpha_vantage;
