pub mod a025_metric_goal;
