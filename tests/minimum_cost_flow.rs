use network_flows::maximum_flow;
use network_flows::minimum_cost_flow::graph::Graph;
use network_flows::minimum_cost_flow::{self, MinCostFlow, SuccessiveShortestPath};
use network_flows::{FlowError, InputError, ResidualGraph, SolverConfig, Status};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rstest::{fixture, rstest};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[fixture]
fn transport() -> ResidualGraph<i64> {
    let capacity = vec![
        vec![0, 5, 3, 0, 0, 0],
        vec![0, 0, 0, 7, 4, 0],
        vec![0, 3, 0, 3, 0, 2],
        vec![0, 0, 0, 0, 0, 5],
        vec![0, 0, 0, 0, 0, 4],
        vec![0, 0, 0, 0, 0, 0],
    ];
    let cost = vec![
        vec![0, 2, 4, 0, 0, 0],
        vec![0, 0, 0, 3, 2, 0],
        vec![0, 1, 0, 2, 0, 3],
        vec![0, 0, 0, 0, 0, 1],
        vec![0, 0, 0, 0, 0, 2],
        vec![0, 0, 0, 0, 0, 0],
    ];
    ResidualGraph::from_matrices(&capacity, &cost).unwrap()
}

fn assert_reduced_costs_non_negative(solver: &SuccessiveShortestPath<i64>, graph: &ResidualGraph<i64>, source: usize) {
    let reached = graph.reachable_from(source).unwrap();
    for u in (0..graph.num_nodes()).filter(|&u| reached[u]) {
        for arc_index in graph.arcs(u) {
            if graph.residual_capacity(arc_index) > 0 {
                let reduced_cost = solver.reduced_cost(graph, u, arc_index);
                assert!(reduced_cost >= 0, "reduced cost {} on {} -> {}", reduced_cost, u, graph.arc(arc_index).to);
            }
        }
    }
}

// Bellman-Ford over the residual network; a flow of fixed value is of
// minimum cost iff no residual cycle has negative cost
fn has_negative_cycle(graph: &ResidualGraph<i64>) -> bool {
    let n = graph.num_nodes();
    let mut dist = vec![0i64; n];
    for _ in 0..=n {
        let mut updated = false;
        for u in 0..n {
            for arc_index in graph.arcs(u) {
                let arc = graph.arc(arc_index);
                if graph.residual_capacity(arc_index) > 0 && dist[u] + arc.cost < dist[arc.to] {
                    dist[arc.to] = dist[u] + arc.cost;
                    updated = true;
                }
            }
        }
        if !updated {
            return false;
        }
    }
    true
}

#[rstest]
fn demand_of_five_costs_thirty(transport: ResidualGraph<i64>) {
    init();
    let mut first = transport.clone();
    let mut solver = SuccessiveShortestPath::default();
    let result = solver.minimize(&mut first, 0, 5, 5).unwrap();

    assert_eq!(result.flow, 5);
    assert_eq!(result.cost, 30);
    assert_eq!(result.status, Status::Optimal);
    assert_eq!(result.cost, first.flow_cost());
    assert_reduced_costs_non_negative(&solver, &first, 0);
    assert!(!has_negative_cycle(&first));

    let mut second = transport;
    let again = SuccessiveShortestPath::default().minimize(&mut second, 0, 5, 5).unwrap();
    assert_eq!(result, again);
}

#[rstest]
fn demand_beyond_capacity_is_a_partial_result(transport: ResidualGraph<i64>) {
    init();
    let mut graph = transport;
    let mut solver = SuccessiveShortestPath::default();
    let result = solver.minimize(&mut graph, 0, 5, 10).unwrap();

    assert_eq!(result.flow, 8);
    assert_eq!(result.cost, 51);
    assert_eq!(result.status, Status::DemandUnreachable);
    assert!(!result.status.is_optimal());
    assert!(!graph.reachable_from(0).unwrap()[5]);
    assert_reduced_costs_non_negative(&solver, &graph, 0);
}

#[rstest]
fn topping_up_matches_routing_everything_at_once(transport: ResidualGraph<i64>) {
    init();
    let mut stepwise = transport.clone();
    let mut solver = SuccessiveShortestPath::default();
    let first = solver.minimize(&mut stepwise, 0, 5, 5).unwrap();
    let second = solver.minimize(&mut stepwise, 0, 5, 3).unwrap();
    assert_eq!(first.flow + second.flow, 8);
    assert_eq!(second.status, Status::Optimal);
    assert_reduced_costs_non_negative(&solver, &stepwise, 0);

    let mut at_once = transport;
    let result = SuccessiveShortestPath::default().minimize(&mut at_once, 0, 5, 8).unwrap();
    assert_eq!(first.cost + second.cost, result.cost);
    assert_eq!(stepwise.flow_cost(), 51);
    assert!(!has_negative_cycle(&stepwise));
}

#[rstest]
fn budget_stops_after_the_first_path(transport: ResidualGraph<i64>) {
    init();
    let mut graph = transport;
    let result = SuccessiveShortestPath::with_config(SolverConfig::with_max_augmentations(1)).minimize(&mut graph, 0, 5, 5).unwrap();

    // 0 -> 1 -> 4 -> 5 at unit cost 6, limited by 1 -> 4
    assert_eq!(result.flow, 4);
    assert_eq!(result.cost, 24);
    assert_eq!(result.augmentations, 1);
    assert_eq!(result.status, Status::BudgetExhausted);
}

#[test]
fn builder_graph_receives_the_flows() {
    init();
    let mut graph = Graph::default();
    graph.add_nodes(6);
    for &(u, v, c, w) in &[(0, 1, 5, 2), (0, 2, 3, 4), (1, 3, 7, 3), (1, 4, 4, 2), (2, 1, 3, 1), (2, 3, 3, 2), (2, 5, 2, 3), (3, 5, 5, 1), (4, 5, 4, 2)] {
        graph.add_directed_edge(u, v, c, w).unwrap();
    }

    let result = SuccessiveShortestPath::default().solve(0, 5, 5, &mut graph).unwrap();
    assert_eq!(result.cost, 30);
    assert_eq!(graph.minimum_cost(), 30);
    for e in 0..graph.num_edges() {
        let edge = graph.get_edge(e).unwrap();
        assert_eq!(edge.flow, result.flow_per_edge[e]);
        assert!(edge.flow <= edge.upper);
    }
}

#[test]
fn free_function_returns_the_final_residual_network() {
    let edges = [(0, 1, 2, 1), (1, 2, 2, 1), (0, 2, 1, 5)];
    let (result, residual): (MinCostFlow<i64>, _) = minimum_cost_flow::successive_shortest_path(3, &edges, 0, 2, 3).unwrap();
    assert_eq!(result.flow_per_edge, vec![2, 2, 1]);
    assert_eq!(result.cost, 2 * 2 + 5);
    assert_eq!(residual.capacity(0, 1), Ok(0));
}

#[test]
fn random_networks_route_min_of_demand_and_max_flow_optimally() {
    init();
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    for _ in 0..200 {
        let num_nodes = rng.gen_range(2..10);
        let num_edges = rng.gen_range(0..30);
        let edges: Vec<(usize, usize, i64, i64)> =
            (0..num_edges).map(|_| (rng.gen_range(0..num_nodes), rng.gen_range(0..num_nodes), rng.gen_range(0..10), rng.gen_range(0..10))).collect();
        let (source, sink) = (0, num_nodes - 1);
        let demand = rng.gen_range(0..30);

        let (result, residual) = minimum_cost_flow::successive_shortest_path(num_nodes, &edges, source, sink, demand).unwrap();
        let capacities: Vec<(usize, usize, i64)> = edges.iter().map(|&(u, v, c, _)| (u, v, c)).collect();
        let (max_flow, _) = maximum_flow::dinic(num_nodes, &capacities, source, sink).unwrap();

        assert_eq!(result.flow, demand.min(max_flow.value));
        assert_eq!(result.status == Status::Optimal, demand <= max_flow.value);
        assert_eq!(result.cost, residual.flow_cost());
        for u in (0..num_nodes).filter(|&u| u != source && u != sink) {
            assert_eq!(residual.inflow(u), residual.outflow(u));
        }
        assert!(!has_negative_cycle(&residual), "suboptimal flow on {:?}", edges);
    }
}

#[rstest]
#[case(vec![(0, 1, 3, -1)], 0, 1, 1, InputError::NegativeCost { edge: 0 })]
#[case(vec![(0, 1, -3, 1)], 0, 1, 1, InputError::NegativeCapacity { edge: 0 })]
#[case(vec![(0, 1, 3, 1)], 1, 1, 1, InputError::SourceIsSink { node: 1 })]
#[case(vec![(0, 1, 3, 1)], 0, 2, 1, InputError::NodeOutOfRange { node: 2, num_nodes: 2 })]
#[case(vec![(0, 1, 3, 1)], 0, 1, -1, InputError::NegativeDemand)]
fn invalid_input_is_rejected(#[case] edges: Vec<(usize, usize, i64, i64)>, #[case] source: usize, #[case] sink: usize, #[case] demand: i64, #[case] expected: InputError) {
    let err = minimum_cost_flow::successive_shortest_path(2, &edges, source, sink, demand).unwrap_err();
    assert_eq!(err, FlowError::InvalidInput(expected));
}
