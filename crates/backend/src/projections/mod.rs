pub mod p910_funnel_counters;
